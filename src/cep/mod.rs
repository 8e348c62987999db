//! Postal code (CEP) enrichment
//!
//! Looks up each address' CEP on BrasilAPI and fills in state, city and
//! street. Lookups run in address order and stop at the first failure.

mod client;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::Endereco;

pub use client::{BrasilApiClient, CepClientError, DEFAULT_BASE_URL};

/// Location data returned for a CEP
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CepInfo {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
}

/// Upstream lookup failure.
/// `status` is absent for transport failures (timeouts, refused connections).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("CEP lookup failed (status {status:?}): {}", .message.as_deref().unwrap_or("no message"))]
pub struct CepError {
    pub status: Option<u16>,
    pub message: Option<String>,
}

impl CepError {
    pub fn new(status: Option<u16>, message: Option<String>) -> Self {
        Self { status, message }
    }
}

/// Postal code lookup service
#[async_trait]
pub trait CepLookup: Send + Sync {
    async fn lookup(&self, cep: &str) -> Result<CepInfo, CepError>;
}

/// Merge CEP data into every address, in place.
///
/// `None` is a no-op. On the first failed lookup the error is returned and
/// the remaining addresses are left untouched; addresses before it keep
/// their enrichment.
pub async fn enrich_addresses(
    enderecos: Option<&mut [Endereco]>,
    cep_lookup: &dyn CepLookup,
) -> Result<(), CepError> {
    let Some(enderecos) = enderecos else {
        tracing::info!("No addresses in request, skipping CEP lookup");
        return Ok(());
    };

    for endereco in enderecos.iter_mut() {
        tracing::info!(cep = %endereco.cep, "Looking up CEP");

        let info = cep_lookup.lookup(&endereco.cep).await.map_err(|e| {
            tracing::error!(cep = %endereco.cep, error = %e, "CEP lookup failed");
            e
        })?;

        tracing::info!(
            cep = %endereco.cep,
            uf = ?info.state,
            cidade = ?info.city,
            rua = ?info.street,
            "CEP data retrieved"
        );

        endereco.uf = info.state;
        endereco.cidade = info.city;
        endereco.rua = info.street;
    }

    Ok(())
}
