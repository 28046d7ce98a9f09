use serde::{Deserialize, Serialize};

use crate::dns_header::HEADER_LEN;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_dns_port")]
    pub dns_port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Capacity of the response buffer handed to the resolver.
    #[serde(default = "default_max_response_size")]
    pub max_response_size: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.dns_port)
    }

    pub fn has_valid_response_size(&self) -> bool {
        self.max_response_size as usize >= HEADER_LEN
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dns_port: default_dns_port(),
            bind_address: default_bind_address(),
            max_response_size: default_max_response_size(),
        }
    }
}

fn default_dns_port() -> u16 {
    5959
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_max_response_size() -> u16 {
    512
}
