use crate::{config::Config, error, spotify, success};

pub async fn auth(config: &Config) {
    match spotify::auth::auth(config).await {
        Ok(()) => success!("Authentication successful!"),
        Err(e) => error!("{}", e),
    }
}
