use fragrance_prices::lambda::{bootstrap, update_fragrance};
use lambda_http::{run, service_fn, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let store = bootstrap().await?;

    run(service_fn(|event| update_fragrance(store.as_ref(), event))).await
}
