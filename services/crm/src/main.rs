use sea_orm::Database;
use tracing::info;

use kontor_crm::config::CrmConfig;
use kontor_crm::infra::mailer::SmtpMailer;
use kontor_crm::router::build_router;
use kontor_crm::state::AppState;

#[tokio::main]
async fn main() {
    kontor_core::tracing::init_tracing();

    let config = CrmConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let mailer = SmtpMailer::from_config(config.smtp_url.as_deref(), config.mail_from.as_deref())
        .expect("invalid SMTP_URL");
    if config.smtp_url.is_none() {
        info!("SMTP_URL not set — login codes will be written to the log");
    }

    let state = AppState {
        db,
        mailer,
        session_secret: config.session_secret,
        cookie_domain: config.cookie_domain,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.crm_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("crm service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
