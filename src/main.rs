use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use ecotrack_backend::cache::{BreachLedger, CacheConfig, MemoryBreachLedger, RedisClient};
use ecotrack_backend::config::{DatabaseConfig, EnvironmentConfig};
use ecotrack_backend::repositories::snapshot_repository::PgSnapshotRepository;
use ecotrack_backend::state::AppState;
use ecotrack_backend::{create_app, database};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging (RUST_LOG tiene prioridad)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ecotrack_backend=debug,tower_http=info,sqlx=warn")),
        )
        .init();

    info!("🚜 EcoTrack - Backend de alquiler de maquinaria");
    info!("================================================");

    let config = EnvironmentConfig::from_env()?;
    info!("⚙️ Entorno: {}", config.environment);

    // Inicializar base de datos
    let pool = match database::connect_and_migrate(&DatabaseConfig::new(config.database_url.clone())).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {:#}", e);
            return Err(e);
        }
    };

    // Registro de incidencias de geocerca: Redis si está configurado
    let ledger: Arc<dyn BreachLedger> = match &config.redis_url {
        Some(url) => match RedisClient::new(CacheConfig::new(url.clone())).await {
            Ok(client) => Arc::new(client),
            Err(e) => {
                warn!("⚠️ Redis no disponible ({}), usando registro en memoria", e);
                Arc::new(MemoryBreachLedger::new())
            }
        },
        None => Arc::new(MemoryBreachLedger::new()),
    };

    let addr: SocketAddr = config.server_url().parse()?;
    let snapshots = Arc::new(PgSnapshotRepository::new(pool.clone()));
    let app_state = AppState::new(pool, config, snapshots, ledger)?;
    let app = create_app(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("   CRUD /api/dealer, /api/customer, /api/vehicle");
    info!("   POST /api/customer/:id/payments - Registrar pago");
    info!("   POST /api/vehicle/:id/location - Reporte de posición + geocerca");
    info!("   GET|POST /api/rental, POST /api/rental/:id/return - Alquileres");
    info!("   GET  /api/alert, POST /api/alert/evaluate - Alertas");
    info!("   GET  /api/dashboard, /api/dashboard/customer/:id - Dashboard");
    info!("   GET  /api/geofence - Zona permitida");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
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
