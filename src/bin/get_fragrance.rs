use fragrance_prices::lambda::{bootstrap, get_fragrance};
use lambda_http::{run, service_fn, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let store = bootstrap().await?;

    run(service_fn(|event| get_fragrance(store.as_ref(), event))).await
}
