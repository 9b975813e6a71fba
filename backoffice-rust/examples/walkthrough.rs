use dotenvy::dotenv;
use portfolio_backoffice::{
    Backoffice, BackofficeOptions, HeadlessPage, LoadedPage, LoginForm, PageKind,
};
use portfolio_sdk::ApiClientOptions;
use std::{env, error::Error, sync::Arc};
use tracing_subscriber::EnvFilter;

// Logs in with BACKOFFICE_EMAIL / BACKOFFICE_PASSWORD, then opens the
// landing page and prints the rendered project list.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let storage_path =
        env::var("BACKOFFICE_STORAGE_PATH").unwrap_or_else(|_| "backoffice-session.json".into());
    let options = BackofficeOptions {
        api: ApiClientOptions {
            base_url: env::var("PORTFOLIO_API_BASE_URL").ok(),
            client: None,
        },
        ..Default::default()
    };

    let page = Arc::new(HeadlessPage::new());
    let app = Backoffice::with_file_storage(storage_path, page.clone(), options)?;

    if let LoadedPage::Login(mut login) = app.on_load(PageKind::Login).await {
        login
            .submit(&LoginForm {
                email: env::var("BACKOFFICE_EMAIL")?,
                password: env::var("BACKOFFICE_PASSWORD")?,
            })
            .await;
    }

    match app.on_load(PageKind::Home).await {
        LoadedPage::Home(controller) => {
            println!("{} project(s)", controller.projects().len());
            println!("{}", page.list_html());
        }
        _ => println!("not logged in: {}", page.message().text),
    }

    Ok(())
}
