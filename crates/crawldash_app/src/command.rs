//! Line commands accepted at the prompt.
use crawldash_core::{BulkAction, SortField};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { email: String, password: String },
    Register {
        name: String,
        email: String,
        password: String,
    },
    Logout,
    Refresh,
    /// Empty term clears the filter.
    Search(String),
    Add(Vec<String>),
    Select(String),
    Unselect(String),
    SelectAll(bool),
    Bulk(BulkAction),
    Sort(SortField),
    Show(String),
    Close,
    Stats,
    List,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`; type `help` for a list")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("unknown sort field `{0}`")]
    SortField(String),
}

pub const HELP: &str = "\
commands:
  login <email> <password>        register <name> <email> <password>
  logout                          refresh
  search [term...]                add <url> [url...]
  select <id>                     unselect <id>
  select-all                      select-none
  start | stop | delete | recrawl act on the selection
  sort <field>                    url, title, status, html_version, internal_links,
                                  external_links, broken_links, created_at,
                                  completed_at, duration
  show <id>                       close
  stats                           list
  help                            quit";

impl Command {
    /// `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match (head, args.as_slice()) {
            ("login", [email, password]) => Command::Login {
                email: email.to_string(),
                password: password.to_string(),
            },
            ("login", _) => return Err(CommandError::Usage("login <email> <password>")),
            ("register", [name, email, password]) => Command::Register {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            },
            ("register", _) => {
                return Err(CommandError::Usage("register <name> <email> <password>"))
            }
            ("logout", []) => Command::Logout,
            ("refresh", []) => Command::Refresh,
            ("search", terms) => Command::Search(terms.join(" ")),
            ("add", []) => return Err(CommandError::Usage("add <url> [url...]")),
            ("add", urls) => Command::Add(urls.iter().map(|url| url.to_string()).collect()),
            ("select", [id]) => Command::Select(id.to_string()),
            ("select", _) => return Err(CommandError::Usage("select <id>")),
            ("unselect", [id]) => Command::Unselect(id.to_string()),
            ("unselect", _) => return Err(CommandError::Usage("unselect <id>")),
            ("select-all", []) => Command::SelectAll(true),
            ("select-none", []) => Command::SelectAll(false),
            ("start", []) => Command::Bulk(BulkAction::Start),
            ("stop", []) => Command::Bulk(BulkAction::Stop),
            ("delete", []) => Command::Bulk(BulkAction::Delete),
            ("recrawl", []) => Command::Bulk(BulkAction::Recrawl),
            ("sort", [field]) => Command::Sort(
                SortField::parse(field).ok_or_else(|| CommandError::SortField(field.to_string()))?,
            ),
            ("sort", _) => return Err(CommandError::Usage("sort <field>")),
            ("show", [id]) => Command::Show(id.to_string()),
            ("show", _) => return Err(CommandError::Usage("show <id>")),
            ("close", []) => Command::Close,
            ("stats", []) => Command::Stats,
            ("list", []) => Command::List,
            ("help", _) => Command::Help,
            ("quit" | "exit", []) => Command::Quit,
            (other, _) => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}
