// src/config.rs

use crate::{
    db::{SessionRepository, UserRepository},
    services::{
        auth::AuthService, billing_service::BillingService, case_service::CaseService,
        dashboard_service::DashboardService, document_service::DocumentService,
        mutation::MutationService, tenancy_service::TenantService,
    },
};
use anyhow::Context;
use rust_decimal::Decimal;
use std::{env, fmt::Display, str::FromStr, sync::Arc, time::Duration};

// As configurações lidas do ambiente (.env)
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub simulated_latency: Duration,
    pub invoice_tax_rate: Decimal,
    pub bcrypt_cost: u32,
    pub notification_capacity: usize,
}

impl Config {
    /// Os valores padrão, com o segredo informado.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            jwt_secret: jwt_secret.into(),
            token_ttl_hours: 168,
            simulated_latency: Duration::from_millis(500),
            invoice_tax_rate: Decimal::new(8, 2),
            bcrypt_cost: 10,
            notification_capacity: 50,
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;
        let defaults = Self::new(jwt_secret);

        Ok(Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            token_ttl_hours: var_or("TOKEN_TTL_HOURS", defaults.token_ttl_hours)?,
            simulated_latency: Duration::from_millis(var_or(
                "SIMULATED_LATENCY_MS",
                defaults.simulated_latency.as_millis() as u64,
            )?),
            invoice_tax_rate: var_or("INVOICE_TAX_RATE", defaults.invoice_tax_rate)?,
            bcrypt_cost: var_or("BCRYPT_COST", defaults.bcrypt_cost)?,
            notification_capacity: var_or("NOTIFICATION_CAPACITY", defaults.notification_capacity)?,
            jwt_secret: defaults.jwt_secret,
        })
    }
}

// Lê e converte uma variável; ausente vira o padrão
fn var_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} inválido ({}): {}", key, raw, e)),
        Err(_) => Ok(default),
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth_service: AuthService,
    pub mutations: MutationService,
    pub billing_service: BillingService,
    pub case_service: CaseService,
    pub document_service: DocumentService,
    pub tenant_service: TenantService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        // Os usuários semeados têm as senhas com hash na subida
        let user_repo = UserRepository::seeded(config.bcrypt_cost).await?;
        tracing::info!("✅ Usuários de demonstração carregados");

        // --- Monta o gráfico de dependências ---
        let mutations = MutationService::new(config.simulated_latency);
        let auth_service = AuthService::new(
            user_repo,
            SessionRepository::new(),
            config.jwt_secret.clone(),
            chrono::Duration::hours(config.token_ttl_hours),
            config.bcrypt_cost,
            config.notification_capacity,
        );
        let billing_service = BillingService::new(config.invoice_tax_rate, mutations.clone());
        let case_service = CaseService::new(mutations.clone(), billing_service.clone());

        Ok(Self {
            auth_service,
            billing_service,
            case_service,
            document_service: DocumentService::new(mutations.clone()),
            tenant_service: TenantService::new(mutations.clone()),
            dashboard_service: DashboardService::new(),
            mutations,
            config: Arc::new(config),
        })
    }
}
