//! confluence-rest - Call the Confluence REST API from the command line

#[tokio::main]
async fn main() {
  confluence_rest::cli::run().await;
}
