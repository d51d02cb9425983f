//! HTTP server core implementation
//!
//! This module provides the HttpServer struct and the application factory.

use crate::auth::AuthSystem;
use crate::config::{Config, CorsConfig, ServerConfig};
use crate::server::handlers::health_check;
use crate::server::middleware::with_error_details;
use crate::server::routes;
use crate::server::state::AppState;
use crate::services::LogMailer;
use crate::storage::AdminStore;
use crate::storage::database::Database;
use crate::utils::error::{AdminError, Result};
use actix_cors::Cors;
use actix_web::{
    App, HttpServer as ActixHttpServer,
    middleware::{DefaultHeaders, ErrorHandlerResponse, ErrorHandlers},
    web,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    ///
    /// Connects the database, applies pending migrations, drops expired reset
    /// tickets and wires the authentication system on top of it.
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let database = Database::new(&config.storage().database).await?;
        database.migrate().await?;

        let purged = database.purge_expired_tickets(chrono::Utc::now()).await?;
        if purged > 0 {
            info!(purged, "Removed expired password reset tickets");
        }

        Self::with_store(config, Arc::new(database))
    }

    /// Create a server over an already prepared store
    pub fn with_store(config: &Config, store: Arc<dyn AdminStore>) -> Result<Self> {
        if config.server().dev_mode {
            warn!("Development mode: error responses include internal details");
        }

        let mailer = Arc::new(LogMailer::new(config.email().clone()));
        let auth = AuthSystem::new(config.auth(), store, mailer)?;
        let state = AppState::new(config.clone(), auth);

        Ok(Self {
            config: config.server().clone(),
            state,
        })
    }

    /// Create the Actix-web application
    pub fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let server_config = state.config.server();
        let dev_mode = server_config.dev_mode;
        let cors = Self::cors(&server_config.cors);

        let json_config = web::JsonConfig::default()
            .limit(server_config.max_body_size)
            .error_handler(|err, _req| AdminError::validation(err.to_string()).into());
        let query_config = web::QueryConfig::default()
            .error_handler(|err, _req| AdminError::validation(err.to_string()).into());
        let path_config = web::PathConfig::default()
            .error_handler(|err, _req| AdminError::bad_request(err.to_string()).into());

        App::new()
            .app_data(state)
            .app_data(json_config)
            .app_data(query_config)
            .app_data(path_config)
            .wrap(ErrorHandlers::new().default_handler(move |res| {
                if dev_mode {
                    with_error_details(res)
                } else {
                    Ok(ErrorHandlerResponse::Response(res.map_into_left_body()))
                }
            }))
            .wrap(cors)
            .wrap(TracingLogger::default())
            .wrap(DefaultHeaders::new().add(("Server", "estate-admin")))
            .route("/health", web::get().to(health_check))
            .configure(routes::configure_routes)
    }

    fn cors(config: &CorsConfig) -> Cors {
        if !config.enabled {
            return Cors::default();
        }

        let mut cors = Cors::default()
            .allow_any_method()
            .allow_any_header()
            .max_age(config.max_age);

        if config.allows_all_origins() {
            cors = cors.allow_any_origin();
        } else {
            for origin in &config.allowed_origins {
                cors = cors.allowed_origin(origin);
            }
        }
        cors
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        let workers = self.config.worker_count();

        info!("Starting HTTP server on {} with {} workers", bind_addr, workers);

        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .workers(workers)
            .bind(&bind_addr)
            .map_err(|e| Self::format_bind_error(e, &bind_addr))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        server.await?;

        info!("HTTP server stopped");
        Ok(())
    }

    fn format_bind_error(error: std::io::Error, bind_addr: &str) -> AdminError {
        if error.kind() == std::io::ErrorKind::AddrInUse {
            AdminError::config(format!(
                "Address {} is already in use; set PORT or server.port to another value",
                bind_addr
            ))
        } else {
            AdminError::config(format!("Failed to bind {}: {}", bind_addr, error))
        }
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
