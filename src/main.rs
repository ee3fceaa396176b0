use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

use damage_service::config::{DatabaseConfig, EnvironmentConfig};
use damage_service::database::DatabaseConnection;
use damage_service::{create_app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🚗 Damage Service v{}", env!("CARGO_PKG_VERSION"));
    info!("================================================");

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new(&DatabaseConfig::new(config.db_path.clone())).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error inicializando la base de datos: {:#}", e);
            return Err(e);
        }
    };

    let addr = config.server_url();
    if config.is_development() {
        info!("🧪 Entorno de desarrollo (log {})", config.log_level);
    } else {
        info!("⚙️  Entorno: {}", config.environment);
    }

    let pool = db_connection.pool().clone();
    let app = create_app(AppState::new(pool, config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    / - Información del servicio");
    info!("   POST   /damage (/damage/add) - Registrar daño");
    info!("   GET    /damage - Listar daños");
    info!("   GET    /damage/:car_id - Daños de un vehículo");
    info!("   PUT    /damage/change/:damage_id - Actualizar reporte");
    info!("   DELETE /damage/change/:damage_id - Eliminar reporte");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
