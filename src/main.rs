#[tokio::main]
async fn main() {
    event_booker::run().await;
}
