use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::config::app_conf::AppConfig;
use crate::config::estimator_conf::EstimatorConfig;
use crate::config::mongo_conf::MongoConfig;
use crate::repository::job_repo::{JobRepository, MongoJobRepository};
use crate::repository::notification_repo::{MongoNotificationRepository, NotificationRepository};
use crate::repository::quote_repo::{MongoQuoteRepository, QuoteRepository};
use crate::router::job_router::job_router;
use crate::router::notification_router::notification_router;
use crate::router::quote_router::quote_router;
use crate::service::job_service::JobServiceImpl;
use crate::service::notification_service::{NotificationService, NotificationServiceImpl};
use crate::service::quote_service::QuoteServiceImpl;
use crate::util::estimator::{Estimator, HttpEstimator};

pub struct App {
    config: AppConfig,
    router: Router,
    pub job_service: Arc<JobServiceImpl>,
    pub quote_service: Arc<QuoteServiceImpl>,
    pub notification_service: Arc<NotificationServiceImpl>,
}

impl App {
    pub async fn new() -> Self {
        let config = AppConfig::from_env();
        let mongo_config = MongoConfig::from_env().expect("Mongo config error");
        let estimator_config = EstimatorConfig::from_env().expect("Estimator config error");

        let job_repo = Arc::new(
            MongoJobRepository::new(&mongo_config)
                .await
                .expect("Job repo error"),
        ) as Arc<dyn JobRepository>;
        let quote_repo = Arc::new(
            MongoQuoteRepository::new(&mongo_config)
                .await
                .expect("Quote repo error"),
        ) as Arc<dyn QuoteRepository>;
        let notification_repo = Arc::new(
            MongoNotificationRepository::new(&mongo_config)
                .await
                .expect("Notification repo error"),
        ) as Arc<dyn NotificationRepository>;

        let estimator =
            Arc::new(HttpEstimator::new(estimator_config).expect("Estimator client error"))
                as Arc<dyn Estimator>;

        let notification_service = Arc::new(NotificationServiceImpl { notification_repo });
        let job_service = Arc::new(JobServiceImpl {
            job_repo: job_repo.clone(),
            quote_repo: quote_repo.clone(),
            notifications: notification_service.clone() as Arc<dyn NotificationService>,
            estimator,
        });
        let quote_service = Arc::new(QuoteServiceImpl {
            quote_repo,
            job_repo,
            notifications: notification_service.clone() as Arc<dyn NotificationService>,
        });

        let router = Self::create_router(
            job_service.clone(),
            quote_service.clone(),
            notification_service.clone(),
        );

        App {
            config,
            router,
            job_service,
            quote_service,
            notification_service,
        }
    }

    fn create_router(
        job_service: Arc<JobServiceImpl>,
        quote_service: Arc<QuoteServiceImpl>,
        notification_service: Arc<NotificationServiceImpl>,
    ) -> Router {
        Router::new()
            .merge(job_router(job_service))
            .merge(quote_router(quote_service))
            .merge(notification_router(notification_service))
            .route("/health", get(|| async { "OK" }))
    }

    pub async fn start(self) {
        let addr = SocketAddr::new(
            self.config.host.parse().expect("Invalid host"),
            self.config.port,
        );
        info!("Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .expect("Failed to bind address");
        axum::serve(listener, self.router)
            .await
            .expect("Failed to start server");
    }
}
