use anyhow::Context;
use jsonwebtoken::{DecodingKey, EncodingKey};
use std::{ops::Deref, sync::Arc};

pub struct ConfigInner {
    pub db_url: String,
    pub host: String,
    pub port: u16,
    pub allowed_origin: String,
    pub encoding_key: EncodingKey,
    pub decoding_key: DecodingKey,
}

#[derive(Clone)]
pub struct Config(Arc<ConfigInner>);

fn env_var(key: &str) -> anyhow::Result<String> {
    std::env::var(key).with_context(|| format!("{key} is not set in .env file"))
}

impl Config {
    pub fn from_env() -> anyhow::Result<Config> {
        let port = env_var("PORT")?
            .parse()
            .context("PORT is not a number")?;

        Ok(Self::from_parts(
            env_var("DATABASE_URL")?,
            env_var("HOST")?,
            port,
            env_var("ALLOWED_ORIGIN")?,
            &env_var("JWT_SECRET")?,
        ))
    }

    pub fn from_parts(
        db_url: String,
        host: String,
        port: u16,
        allowed_origin: String,
        jwt_secret: &str,
    ) -> Config {
        let v = ConfigInner {
            db_url,
            host,
            port,
            allowed_origin,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
        };

        Self(Arc::new(v))
    }

    pub fn get_server_url(&self) -> String {
        format!("{}:{}", self.0.host, self.0.port)
    }
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
