//! Console host: runs searches, prints ordered results and reads commands.
//!
//! The host retains each [`SearchSession`] for as long as the user works with
//! its results and treats the [`ResultView`] as disposable; `redraw` tears the
//! view down and re-attaches a new one with the saved sort code.

mod commands;
mod host;

use std::io::{self, BufRead};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::args::Args;
use crate::config;
use crate::logic::{GENERIC_FAILURE_MESSAGE, ResultView, SearchSession, Selection, ViewUpdate};
use crate::sources::AurRpc;

pub use commands::{Command, HELP, parse_command};
pub use host::{ConsoleHost, FollowUp, format_list, package_url};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What happens after the command loop for one session ends.
#[derive(Debug, PartialEq, Eq)]
enum Next {
    Search(FollowUp),
    Quit,
}

/// What: Run the console host until the user quits or input ends.
///
/// Inputs:
/// - `args`: Parsed command line
///
/// Output:
/// - `Ok(())` on normal exit
///
/// # Errors
/// - Blank query, or the HTTP client could not be built
pub async fn run(args: Args) -> Result<()> {
    let settings = config::settings();
    let endpoint = Arc::new(AurRpc::new(
        &settings.rpc_base_url,
        settings.request_timeout(),
    )?);
    let mut host = ConsoleHost::new(
        io::stdout(),
        settings.rpc_base_url.clone(),
        settings.default_sort,
    );
    let mut input = args.interactive(&settings).then(spawn_stdin_reader);

    let mut next = FollowUp {
        field: args.field(&settings),
        query: args.query_text(),
        sort: args.initial_sort(&settings),
    };
    loop {
        let session = Arc::new(SearchSession::start(
            next.field,
            &next.query,
            next.sort,
            Arc::clone(&endpoint),
        )?);
        let Some(lines) = input.as_mut() else {
            let mut view = ResultView::attach(session, None);
            show_settled(&mut view, &mut host).await;
            return Ok(());
        };
        match browse(session, &mut host, lines).await {
            Next::Search(follow_up) => next = follow_up,
            Next::Quit => return Ok(()),
        }
    }
}

/// What: Print the settled state of `view`, announcing the wait if the fetch is still running.
async fn show_settled<W: io::Write>(view: &mut ResultView, host: &mut ConsoleHost<W>) {
    if matches!(view.current(), Ok(ViewUpdate::Loading)) {
        host.show(&ViewUpdate::Loading);
    }
    match view.settled().await {
        Ok(update) => host.show(&update),
        Err(e) => host.line(&format!("error: {e}")),
    }
}

/// What: Command loop over one retained session.
///
/// Inputs:
/// - `session`: Session to browse; kept alive across redraws
/// - `host`: Output and navigation
/// - `lines`: Stdin lines
///
/// Output:
/// - Follow-up search to run next, or `Quit`
async fn browse<W: io::Write>(
    session: Arc<SearchSession>,
    host: &mut ConsoleHost<W>,
    lines: &mut mpsc::UnboundedReceiver<String>,
) -> Next {
    let mut view = ResultView::attach(Arc::clone(&session), None);
    show_settled(&mut view, host).await;
    while let Some(line) = lines.recv().await {
        let cmd = match parse_command(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(msg) => {
                host.line(&msg);
                continue;
            }
        };
        debug!(?cmd, "[Console] Command");
        match cmd {
            Command::Sort(key) => match view.set_sort(key) {
                Ok(update) => host.show(&update),
                Err(e) => host.line(&format!("error: {e}")),
            },
            Command::Open(pos) => {
                if view.select_result(pos, host) == Selection::NoSuchEntry {
                    host.line(&format!("no result {}", pos + 1));
                }
            }
            Command::Maintainer(pos) => match view.select_maintainer(pos, host) {
                Selection::Delivered => {
                    if let Some(follow_up) = host.take_follow_up() {
                        return Next::Search(follow_up);
                    }
                }
                Selection::NoSuchEntry => host.line(&format!("no result {}", pos + 1)),
                Selection::MissingMaintainer => {
                    host.line(GENERIC_FAILURE_MESSAGE);
                }
            },
            Command::Redraw => {
                let saved = view.save_state();
                let previous = view.last_rendered();
                drop(view);
                info!(saved, observers = session.observer_count(), "[Console] Redraw");
                view = ResultView::reattach(Arc::clone(&session), Some(saved), previous);
                show_settled(&mut view, host).await;
            }
            Command::Menu => host.show_menu(&view.menu_state()),
            Command::Help => host.line(HELP),
            Command::Quit => return Next::Quit,
        }
    }
    debug!("[Console] Input closed");
    Next::Quit
}

/// What: Forward stdin lines to an async channel from a blocking thread.
///
/// Output:
/// - Receiver that closes when stdin reaches EOF or fails
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::task::spawn_blocking(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}
