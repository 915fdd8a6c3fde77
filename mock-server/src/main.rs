//! Local stand-in for the Clayful API (`/v1/products`, `/v1/echo`).
//!
//! Point a client at `http://127.0.0.1:$PORT` to exercise transports
//! without touching the production API.

use tokio::net::TcpListener;

const DEFAULT_PORT: &str = "3000";

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("PORT").unwrap_or_else(|_| DEFAULT_PORT.to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    println!("mock Clayful API listening on http://{addr}");
    mock_server::run(listener).await
}
