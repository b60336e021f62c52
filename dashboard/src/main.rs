//! Dashboard entry-point: signs in the configured account against a JSON
//! snapshot and prints the requested views.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use dashboard::DashboardSettings;
use dashboard::domain::ports::{FixtureIdentityProvider, Identity};
use dashboard::domain::{ChatAssistant, DashboardService, UserId};
use dashboard::inbound::ui::{
    NavigationEvent, Notification, ViewModel, ViewRouter, render_notification, render_text,
};
use dashboard::outbound::JsonSnapshotDocumentStore;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Views reachable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OpenView {
    CheckProduct,
    AiChat,
    Transfers,
    Calendar,
    Statistics,
    Kpi,
    MainMenu,
    Profile,
    TodaysPlanCard,
    PendingCard,
    CompletedTodayCard,
    IssuesCard,
}

impl From<OpenView> for NavigationEvent {
    fn from(view: OpenView) -> Self {
        match view {
            OpenView::CheckProduct => Self::GoToCheckProduct,
            OpenView::AiChat => Self::GoToAiChat,
            OpenView::Transfers => Self::GoToTransfers,
            OpenView::Calendar => Self::GoToCalendar,
            OpenView::Statistics => Self::GoToStatistics,
            OpenView::Kpi => Self::GoToKpi,
            OpenView::MainMenu => Self::BackToMainMenu,
            OpenView::Profile => Self::OpenProfile,
            OpenView::TodaysPlanCard => Self::TodaysPlanCard,
            OpenView::PendingCard => Self::PendingCard,
            OpenView::CompletedTodayCard => Self::CompletedTodayCard,
            OpenView::IssuesCard => Self::IssuesCard,
        }
    }
}

/// `dashboard` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dashboard",
    about = "Render the inbound operations dashboard from a JSON snapshot",
    version
)]
struct CliArgs {
    /// Views to open after sign-in, in order.
    #[arg(long = "open", value_enum, value_name = "view")]
    open: Vec<OpenView>,
    /// Messages to send to the assistant after the views are shown.
    #[arg(long = "ask", value_name = "message")]
    ask: Vec<String>,
    /// Snapshot file; overrides `DASHBOARD_SNAPSHOT_PATH`.
    #[arg(long = "snapshot", value_name = "path")]
    snapshot: Option<PathBuf>,
    /// Output format for rendered views.
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> io::Result<()> {
    let args = CliArgs::parse();
    let settings = DashboardSettings::load_from_iter([OsString::from("dashboard")])
        .map_err(|error| io::Error::other(format!("load configuration: {error}")))?;
    init_tracing(settings.json_logs);

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main(args, settings))
}

fn init_tracing(json: bool) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

async fn async_main(args: CliArgs, settings: DashboardSettings) -> io::Result<()> {
    let snapshot_path = args
        .snapshot
        .clone()
        .unwrap_or_else(|| settings.snapshot_path());
    let store = JsonSnapshotDocumentStore::open(&snapshot_path).map_err(io::Error::other)?;
    let uid = UserId::new(settings.user_id())
        .map_err(|error| io::Error::other(format!("invalid user id: {error}")))?;
    let identity = FixtureIdentityProvider::signed_in(
        Identity::new(uid, settings.email()),
        settings.password(),
    );
    let service = DashboardService::new(
        Arc::new(store),
        Arc::new(identity),
        Arc::new(DefaultClock),
    );
    let mut router = ViewRouter::new(
        Arc::new(service),
        ChatAssistant::new(),
        settings.activity_limit(),
    );

    let mut out = io::stdout().lock();
    let landing = router.start().await;
    emit(&mut out, args.format, &landing, &router.take_notifications())?;
    for view in args.open {
        let model = router.navigate(view.into());
        emit(&mut out, args.format, &model, &router.take_notifications())?;
    }
    for message in &args.ask {
        let model = router.send_chat_message(message);
        emit(&mut out, args.format, &model, &router.take_notifications())?;
    }
    Ok(())
}

fn emit(
    out: &mut impl Write,
    format: OutputFormat,
    model: &ViewModel,
    notifications: &[Notification],
) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            for notification in notifications {
                writeln!(out, "{}", render_notification(notification))?;
            }
            writeln!(out, "{}\n", render_text(model))
        }
        OutputFormat::Json => {
            let line = serde_json::json!({ "notifications": notifications, "model": model });
            writeln!(out, "{line}")
        }
    }
}
