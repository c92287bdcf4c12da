// Nyaymitra database connection check
// Makes a single MongoDB connection attempt with the server's settings and
// prints what it finds.

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use nyaymitra::backend::server::ServerConfig;
    use nyaymitra::database::{redact_uri, Connection, Connector, DatabaseError, MongoConnector};

    dotenv::dotenv().ok();

    let config = ServerConfig::from_env()?;
    let uri = config.database.uri.clone();

    println!("🔍 DEBUGGING DATABASE CONNECTION");
    println!("================================");
    println!("MONGODB_URI: {}", redact_uri(&uri));
    println!("Retries configured: {}", config.database.max_retries);
    println!("Retry delay: {}ms", config.database.retry_delay.as_millis());

    println!("\n🧪 Testing connection...");
    let healthy = match MongoConnector::default().connect(&uri).await {
        Ok(connection) => {
            println!("✅ Connection and ping successful!");
            println!("📡 Host: {}", connection.host());

            println!("\n🔌 Closing connection...");
            match connection.close().await {
                Ok(()) => println!("✅ Connection closed cleanly"),
                Err(e) => println!("❌ Error closing connection: {}", e),
            }
            true
        }
        Err(DatabaseError::InvalidUri { message }) => {
            println!("❌ MONGODB_URI could not be parsed: {}", message);
            println!("💡 Expected mongodb://host:port/database or mongodb+srv://...");
            false
        }
        Err(DatabaseError::Ping { message }) => {
            println!("❌ Server selection or ping failed: {}", message);
            println!("💡 Possible issues:");
            println!("   - MongoDB not running on that host/port");
            println!("   - Wrong credentials or authSource");
            println!("   - Network/firewall issues");
            false
        }
        Err(e) => {
            println!("❌ Connection failed: {}", e);
            false
        }
    };

    println!("\n🎯 SUMMARY:");
    if healthy {
        println!("- Database reachable; the server will report ready after bootstrap");
    } else {
        println!("- Database unreachable; the server will start but answer 503 on data routes");
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(not(feature = "ssr"))]
fn main() {
    eprintln!("Requires the 'ssr' feature to be enabled.");
    std::process::exit(1);
}
