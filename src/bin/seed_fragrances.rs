use fragrance_prices::lambda::{bootstrap, seed_fragrances};
use lambda_http::{run, service_fn, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let store = bootstrap().await?;

    run(service_fn(|event| seed_fragrances(store.as_ref(), event))).await
}
