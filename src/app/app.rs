use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::config::{
    AppConfig, CardGatewayConfig, ImageStoreConfig, JwtConfig, MongoConfig, OAuthConfig,
    RedirectGatewayConfig, SuperadminConfig,
};
use crate::middlewares::auth_middleware::AuthState;
use crate::model::user::{Role, User};
use crate::repository::brand_repo::MongoBrandRepository;
use crate::repository::cart_repo::MongoCartRepository;
use crate::repository::category_repo::MongoCategoryRepository;
use crate::repository::notification_repo::MongoNotificationRepository;
use crate::repository::order_repo::MongoOrderRepository;
use crate::repository::product_repo::MongoProductRepository;
use crate::repository::site_config_repo::MongoSiteConfigRepository;
use crate::repository::user_repo::{MongoUserRepository, UserRepository};
use crate::repository::wishlist_repo::MongoWishlistRepository;
use crate::repository::MongoStore;
use crate::router::auth_router::auth_router;
use crate::router::cart_router::cart_router;
use crate::router::catalog_router::catalog_router;
use crate::router::order_router::order_router;
use crate::router::payment_router::payment_router;
use crate::router::product_router::product_router;
use crate::router::site_config_router::site_config_router;
use crate::router::upload_router::upload_router;
use crate::router::user_router::user_router;
use crate::router::wishlist_router::wishlist_router;
use crate::service::auth_service::AuthServiceImpl;
use crate::service::cart_service::CartServiceImpl;
use crate::service::catalog_service::CatalogServiceImpl;
use crate::service::order_service::OrderServiceImpl;
use crate::service::payment_service::PaymentServiceImpl;
use crate::service::site_config_service::SiteConfigServiceImpl;
use crate::service::user_service::UserServiceImpl;
use crate::service::wishlist_service::WishlistServiceImpl;
use crate::util::image_store::ImageStoreService;
use crate::util::jwt::JwtTokenUtilsImpl;
use crate::util::password::{PasswordUtils, PasswordUtilsImpl};

pub struct App {
    config: AppConfig,
    router: Router,
    user_repo: Arc<MongoUserRepository>,
}

impl App {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config = AppConfig::from_env();

        let jwt_config = JwtConfig::from_env()?;
        jwt_config.validate()?;
        let mongo_config = MongoConfig::from_env()?;
        mongo_config.validate()?;

        let store = MongoStore::connect(&mongo_config).await?;
        info!(database = %mongo_config.database, "Connected to document store");

        let user_repo = Arc::new(MongoUserRepository::new(&store));
        let product_repo = Arc::new(MongoProductRepository::new(&store));
        let category_repo = Arc::new(MongoCategoryRepository::new(&store));
        let brand_repo = Arc::new(MongoBrandRepository::new(&store));
        let cart_repo = Arc::new(MongoCartRepository::new(&store));
        let wishlist_repo = Arc::new(MongoWishlistRepository::new(&store));
        let order_repo = Arc::new(MongoOrderRepository::new(&store));
        let notification_repo = Arc::new(MongoNotificationRepository::new(&store));
        let site_config_repo = Arc::new(MongoSiteConfigRepository::new(&store));

        let jwt_utils = Arc::new(JwtTokenUtilsImpl::new(jwt_config));

        // Optional collaborators: each degrades its feature when absent.
        let image_store = match ImageStoreConfig::from_env() {
            Ok(config) => match ImageStoreService::new(config).await {
                Ok(service) => Some(Arc::new(service)),
                Err(e) => {
                    error!("Image store unavailable, uploads disabled: {}", e);
                    None
                }
            },
            Err(e) => {
                warn!("Image store not configured, uploads disabled: {}", e);
                None
            }
        };
        let oauth_config = OAuthConfig::from_env();
        let card_gateway = CardGatewayConfig::from_env();
        let redirect_gateway = RedirectGatewayConfig::from_env();

        let auth_service = Arc::new(AuthServiceImpl::new(
            user_repo.clone(),
            jwt_utils.clone(),
            oauth_config,
        ));
        let user_service = Arc::new(UserServiceImpl::new(user_repo.clone()));
        let catalog_service = Arc::new(CatalogServiceImpl::new(
            product_repo.clone(),
            category_repo,
            brand_repo,
            cart_repo.clone(),
            wishlist_repo.clone(),
            image_store.clone(),
        ));
        let cart_service = Arc::new(CartServiceImpl::new(cart_repo.clone(), product_repo.clone()));
        let wishlist_service = Arc::new(WishlistServiceImpl::new(wishlist_repo, product_repo.clone()));
        let order_service = Arc::new(OrderServiceImpl::new(
            order_repo.clone(),
            product_repo,
            cart_repo,
            site_config_repo.clone(),
        ));
        let payment_service = Arc::new(PaymentServiceImpl::new(
            order_repo,
            site_config_repo.clone(),
            card_gateway,
            redirect_gateway,
        ));
        let site_config_service =
            Arc::new(SiteConfigServiceImpl::new(site_config_repo, notification_repo));

        let auth_state = Arc::new(AuthState {
            jwt_utils,
            user_repo: user_repo.clone(),
        });

        let cors = CorsLayer::new()
            .allow_origin(config.frontend_origin.parse::<HeaderValue>()?)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([axum::http::header::AUTHORIZATION, axum::http::header::CONTENT_TYPE]);

        let router = Router::new()
            .merge(auth_router(auth_service))
            .merge(user_router(user_service, auth_state.clone()))
            .merge(product_router(catalog_service.clone(), auth_state.clone()))
            .merge(catalog_router(catalog_service, auth_state.clone()))
            .merge(cart_router(cart_service, auth_state.clone()))
            .merge(wishlist_router(wishlist_service, auth_state.clone()))
            .merge(order_router(order_service, auth_state.clone()))
            .merge(payment_router(payment_service, auth_state.clone()))
            .merge(upload_router(image_store, auth_state.clone()))
            .merge(site_config_router(site_config_service, auth_state))
            .route("/health", get(|| async { "OK" }))
            .layer(cors)
            .layer(TraceLayer::new_for_http());

        let app = App { config, router, user_repo };
        app.seed_superadmin().await;
        Ok(app)
    }

    pub async fn start(self) -> Result<(), Box<dyn std::error::Error>> {
        let addr = SocketAddr::new(self.config.host.parse()?, self.config.port);
        info!("Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;
        Ok(())
    }

    /// Creates the superadmin account on first startup so the admin console
    /// is reachable before any user exists. Skipped when the account already
    /// exists or the config is absent.
    async fn seed_superadmin(&self) {
        let config = match SuperadminConfig::from_env() {
            Ok(config) => config,
            Err(e) => {
                warn!("Superadmin config not loaded, skipping seed: {e}");
                return;
            }
        };

        match self.user_repo.find_by_email(&config.email).await {
            Ok(Some(_)) => {
                info!("Superadmin account already exists, skipping seed");
                return;
            }
            Ok(None) => {}
            Err(e) => {
                error!("Failed to check for existing superadmin: {e}");
                return;
            }
        }

        let hash = match PasswordUtilsImpl::hash_password(&config.password) {
            Ok(hash) => hash,
            Err(e) => {
                error!("Failed to hash superadmin password: {e}");
                return;
            }
        };

        let mut user = User::new(config.name, config.email.to_lowercase(), Role::Superadmin);
        user.password_hash = hash;
        user.is_verified = true;

        match self.user_repo.insert(user).await {
            Ok(_) => info!("Superadmin account created"),
            Err(e) => error!("Failed to create superadmin account: {e}"),
        }
    }
}
