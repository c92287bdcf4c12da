// Nyaymitra endpoint smoke test
// Calls every public endpoint of a running server and reports the result.
// Base URL comes from API_BASE_URL (default http://localhost:3000).

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use nyaymitra::backend::routes::API_ENDPOINTS;
    use reqwest::Method;

    dotenv::dotenv().ok();

    let base_url = std::env::var("API_BASE_URL")
        .unwrap_or_else(|_| "http://localhost:3000".to_string());
    let base_url = base_url.trim_end_matches('/');

    println!("🧪 Testing API Endpoints");
    println!("========================");
    println!("Base URL: {}", base_url);

    let client = reqwest::Client::new();
    let mut failures = Vec::new();

    for endpoint in API_ENDPOINTS {
        let url = format!("{}{}", base_url, endpoint.path);
        println!("\n🔍 Testing {} {}", endpoint.method, endpoint.path);
        println!("   Description: {}", endpoint.description);

        let method = Method::from_bytes(endpoint.method.as_bytes())?;
        let mut request = client
            .request(method.clone(), &url)
            .header("Accept", "application/json");
        if method == Method::POST {
            request = request.json(&serde_json::json!({ "test": true }));
        }

        match request.send().await {
            Ok(response) => {
                let status = response.status();
                let body: serde_json::Value = response.json().await.unwrap_or_default();
                if status.is_success() {
                    println!("   ✅ Status: {}", status);
                } else {
                    println!("   ❌ Status: {}", status);
                    failures.push(format!("{} {} -> {}", endpoint.method, endpoint.path, status));
                }
                println!("   📝 Response: {}", body);
            }
            Err(e) => {
                println!("   ❌ Request failed: {}", e);
                failures.push(format!("{} {} -> {}", endpoint.method, endpoint.path, e));
            }
        }
    }

    println!("\n📊 SUMMARY:");
    println!(
        "   {} passed, {} failed",
        API_ENDPOINTS.len() - failures.len(),
        failures.len()
    );
    if !failures.is_empty() {
        for failure in &failures {
            println!("   - {}", failure);
        }
        std::process::exit(1);
    }

    println!("🎉 All endpoints responded successfully!");
    Ok(())
}

#[cfg(not(feature = "ssr"))]
fn main() {
    eprintln!("Requires the 'ssr' feature to be enabled.");
    std::process::exit(1);
}
