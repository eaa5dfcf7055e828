use seguimiento_rector::{api, AppConfig, BackendClient, SeguimientoService};
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 使用本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::load()?;
    info!("Starting server with config: {:?}", config);

    // 后端 REST 客户端
    let backend = BackendClient::new(&config.backend)?;
    info!("Backend API base: {}", backend.base_url());

    let service = Arc::new(SeguimientoService::new(backend));

    let app = api::router(service).layer(ServiceBuilder::new());

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  GET  /api/seguimiento/:id/detalle    - 明细 (partida/rubro/proveedor + adjudicados)");
    info!("  PUT  /api/seguimiento/:id/gestion    - Gestión del Rector");
    info!("  POST /api/seguimiento/:id/adjudicar  - Adjudicar proveedor");
    info!("  GET  /api/catalogos                  - Estatus, fundamentos, servidores");
    info!("  GET  /api/servidores                 - Búsqueda de servidores públicos");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
