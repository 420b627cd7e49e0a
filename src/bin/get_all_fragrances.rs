use fragrance_prices::lambda::{bootstrap, get_all_fragrances};
use lambda_http::{run, service_fn, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let store = bootstrap().await?;

    run(service_fn(|event| get_all_fragrances(store.as_ref(), event))).await
}
