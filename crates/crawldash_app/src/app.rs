use std::io::{self, BufRead};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use crawldash_client::{
    ApiClient, ApiError, CrawlerBackend, FileStore, KeyValueStore, MemoryStore, Session,
};
use crawldash_core::{update, DashboardState, Msg};
use crawldash_logging::{dash_info, dash_warn};
use tokio::runtime::Runtime;

use crate::command::{Command, HELP};
use crate::config::AppConfig;
use crate::effects::EffectRunner;
use crate::render::{render_view, LOGIN_PROMPT};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    let settings = config.client_settings();
    let store: Arc<dyn KeyValueStore> = if config.storage_path.as_os_str().is_empty() {
        Arc::new(MemoryStore::default())
    } else {
        Arc::new(FileStore::open(&config.storage_path))
    };
    let session = Arc::new(Session::restore(store));
    // The engine and the prompt run on separate runtimes, so each gets its
    // own connection pool. Both share the session.
    let engine_client = ApiClient::new(&settings, session.clone()).context("building API client")?;
    let auth = ApiClient::new(&settings, session).context("building API client")?;
    let runner = EffectRunner::new(Arc::new(engine_client), settings.bulk_concurrency)
        .context("starting engine")?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting runtime")?;

    let mut app = App {
        state: DashboardState::with_session(auth.is_authenticated()),
        auth,
        runner,
        runtime,
    };
    let input = spawn_input_reader();

    println!("crawldash: type `help` for commands");
    app.dispatch(Msg::Mounted);
    loop {
        match input.recv_timeout(POLL_INTERVAL) {
            Ok(line) => match Command::parse(&line) {
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => app.execute(command),
                Ok(None) => {}
                Err(err) => println!("{err}"),
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
        app.drain_engine();
    }
    dash_info!("Exiting");
    Ok(())
}

struct App {
    state: DashboardState,
    auth: ApiClient,
    runner: EffectRunner,
    runtime: Runtime,
}

impl App {
    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let login_required = self.runner.enqueue(effects);
        if state.consume_dirty() {
            println!("{}", render_view(&state.view()));
        }
        self.state = state;
        if login_required {
            println!("{LOGIN_PROMPT}");
        }
    }

    fn drain_engine(&mut self) {
        while let Some(msg) = self.runner.try_recv() {
            self.dispatch(msg);
        }
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::Login { email, password } => self.login(&email, &password),
            Command::Register {
                name,
                email,
                password,
            } => self.register(&name, &email, &password),
            Command::Logout => self.dispatch(Msg::LogoutClicked),
            Command::Refresh => self.dispatch(Msg::RefreshRequested),
            Command::Search(term) => self.dispatch(Msg::SearchChanged(term)),
            Command::Add(mut urls) => {
                if urls.len() == 1 {
                    self.dispatch(Msg::AddFormOpened);
                    self.dispatch(Msg::AddUrlSubmitted(urls.remove(0)));
                } else {
                    self.bulk_add(&urls);
                }
            }
            Command::Select(id) => self.dispatch(Msg::RowToggled { id, checked: true }),
            Command::Unselect(id) => self.dispatch(Msg::RowToggled { id, checked: false }),
            Command::SelectAll(checked) => self.dispatch(Msg::SelectAllToggled(checked)),
            Command::Bulk(action) => {
                if self.state.selection().is_empty() {
                    println!("Nothing selected; use `select <id>` or `select-all` first.");
                    return;
                }
                self.dispatch(Msg::BulkActionRequested(action));
            }
            Command::Sort(field) => self.dispatch(Msg::SortClicked(field)),
            Command::Show(id) => self.dispatch(Msg::DetailsRequested(id)),
            Command::Close => self.dispatch(Msg::DetailsClosed),
            Command::Stats => self.dispatch(Msg::StatsRequested),
            Command::List => println!("{}", render_view(&self.state.view())),
            Command::Help => println!("{HELP}"),
            Command::Quit => {}
        }
    }

    fn login(&mut self, email: &str, password: &str) {
        match self.runtime.block_on(self.auth.login(email, password)) {
            Ok(response) => {
                println!("Logged in as {}", display_name(&response.user.name, email));
                self.dispatch(Msg::SessionChanged {
                    authenticated: true,
                });
                self.dispatch(Msg::Mounted);
            }
            Err(err) => {
                dash_warn!("Login failed: {}", err);
                println!("{err}");
            }
        }
    }

    fn register(&mut self, name: &str, email: &str, password: &str) {
        match self.runtime.block_on(self.auth.register(name, email, password)) {
            Ok(registration) => {
                let message = registration
                    .message
                    .unwrap_or_else(|| "Registration successful".to_string());
                println!("{message}. Log in with `login {email} <password>`.");
            }
            Err(err) => {
                dash_warn!("Registration failed: {}", err);
                println!("{err}");
            }
        }
    }

    fn bulk_add(&mut self, urls: &[String]) {
        match self.runtime.block_on(self.auth.bulk_add_urls(urls)) {
            Ok(outcome) => {
                let added = outcome.jobs.len();
                println!(
                    "{}",
                    outcome
                        .message
                        .unwrap_or_else(|| format!("Added {added} URLs"))
                );
                for error in &outcome.errors {
                    println!("  {error}");
                }
                self.dispatch(Msg::RefreshRequested);
            }
            Err(ApiError::AuthenticationRequired) => {
                self.dispatch(Msg::SessionChanged {
                    authenticated: false,
                });
                println!("{LOGIN_PROMPT}");
            }
            Err(err) => println!("{err}"),
        }
    }
}

fn display_name<'a>(name: &'a str, email: &'a str) -> &'a str {
    if name.is_empty() {
        email
    } else {
        name
    }
}

fn spawn_input_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}
