//! Interactive storefront session.
//!
//! Reads one command per line from stdin and applies it to a single
//! [`AppState`]. Gated commands issued while signed out print the login
//! prompt instead of failing the session.
//!
//! # Commands
//!
//! ```text
//! login <metamask|sui|google|github|facebook>
//! logout
//! whoami
//! products [search]
//! add <product-id> [quantity]
//! cart
//! proposals
//! vote <proposal-id> <for|against>
//! propose <vendor|tag|treasury> <days> <title> | <description>
//! mint <product-id>
//! help
//! quit
//! ```

use tokio::io::{AsyncBufReadExt, BufReader};

use foodchain_core::{ProductId, ProposalCategory, ProposalId, Quantity, VoteChoice};
use foodchain_storefront::catalog::ProductFilter;
use foodchain_storefront::error::AppError;
use foodchain_storefront::models::{Cart, LoginMethod, ProposalDraft};
use foodchain_storefront::state::AppState;

use super::{catalog, governance};

const HELP: &str = "\
Commands:
  login <metamask|sui|google|github|facebook>
  logout
  whoami
  products [search]
  add <product-id> [quantity]
  cart
  proposals
  vote <proposal-id> <for|against>
  propose <vendor|tag|treasury> <days> <title> | <description>
  mint <product-id>
  help
  quit";

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Help,
    Login(LoginMethod),
    Logout,
    WhoAmI,
    Products(String),
    Add(ProductId, Quantity),
    Cart,
    Proposals,
    Vote(ProposalId, VoteChoice),
    Propose(ProposalDraft),
    Mint(ProductId),
    Quit,
}

impl ShellCommand {
    /// Parse one input line. Blank lines yield `None`.
    ///
    /// # Errors
    ///
    /// Returns a usage message when the command or its arguments are invalid.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        let Some((word, rest)) = split_word(line) else {
            return Ok(None);
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "help" | "?" => Self::Help,
            "login" => Self::Login(rest.parse()?),
            "logout" => Self::Logout,
            "whoami" => Self::WhoAmI,
            "products" => Self::Products(rest.to_string()),
            "add" => {
                let (id, qty) = split_word(rest).ok_or("usage: add <product-id> [quantity]")?;
                let quantity = if qty.is_empty() {
                    Quantity::ONE
                } else {
                    Quantity::parse(qty).map_err(|e| e.to_string())?
                };
                Self::Add(parse_id(id)?, quantity)
            }
            "cart" => Self::Cart,
            "proposals" => Self::Proposals,
            "vote" => {
                let (id, choice) =
                    split_word(rest).ok_or("usage: vote <proposal-id> <for|against>")?;
                Self::Vote(parse_id(id)?, choice.to_ascii_lowercase().parse()?)
            }
            "propose" => Self::Propose(parse_draft(rest)?),
            "mint" => Self::Mint(parse_id(rest)?),
            "quit" | "exit" => Self::Quit,
            other => return Err(format!("unknown command: {other} (try 'help')")),
        };
        Ok(Some(command))
    }
}

/// Split off the first whitespace-delimited word.
fn split_word(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    Some(
        s.split_once(char::is_whitespace)
            .map_or((s, ""), |(word, rest)| (word, rest.trim())),
    )
}

fn parse_id<T: std::str::FromStr>(s: &str) -> Result<T, String> {
    s.trim()
        .parse()
        .map_err(|_| format!("invalid id: '{}'", s.trim()))
}

fn parse_draft(rest: &str) -> Result<ProposalDraft, String> {
    const USAGE: &str = "usage: propose <vendor|tag|treasury> <days> <title> | <description>";

    let (category, rest) = split_word(rest).ok_or(USAGE)?;
    let (days, rest) = split_word(rest).ok_or(USAGE)?;
    let (title, description) = rest.split_once('|').ok_or(USAGE)?;

    let category: ProposalCategory = category.to_ascii_lowercase().parse()?;
    let mut draft = ProposalDraft::new(category, title.trim(), description.trim());
    draft.duration_days = days
        .parse()
        .map_err(|_| format!("invalid duration: '{days}'"))?;
    Ok(draft)
}

/// Render the cart with line totals and the badge count.
pub fn cart_summary(cart: &Cart, subtotal: &str) -> String {
    if cart.is_empty() {
        return "Your cart is empty.".to_string();
    }
    let mut out = String::new();
    for line in cart.lines() {
        out.push_str(&format!(
            "{:>3} × {:<24} {:>9}\n",
            line.quantity(),
            line.product().name,
            line.line_total().to_string()
        ));
    }
    out.push_str(&format!(
        "{} items, subtotal {subtotal}",
        cart.total_quantity()
    ));
    out
}

/// Banner naming the store currency.
pub fn greeting(state: &AppState) -> String {
    format!(
        "FoodChain storefront, prices in {}. Type 'help' for commands.",
        state.config().currency.code()
    )
}

/// Run the interactive loop until `quit` or end of input.
///
/// # Errors
///
/// Returns an error only if stdin cannot be read.
#[allow(clippy::print_stdout)]
pub async fn run(state: &AppState) -> Result<(), std::io::Error> {
    println!("{}", greeting(state));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(usage) => {
                println!("{usage}");
                continue;
            }
        };
        if command == ShellCommand::Quit {
            break;
        }
        if let Err(e) = execute(state, command).await {
            report(&e);
        }
    }

    if let Ok(Some(user)) = state.logout() {
        tracing::debug!(wallet = %user.wallet, "Session closed on exit");
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn report(error: &AppError) {
    error.report();
    println!("{}", error.user_message());
    if error.is_auth_required() {
        let methods: Vec<String> = LoginMethod::ALL.iter().map(ToString::to_string).collect();
        println!("  login <{}>", methods.join("|"));
    }
}

/// Apply one command to the session.
///
/// # Errors
///
/// Returns the storefront error for rejected actions.
#[allow(clippy::print_stdout)]
pub async fn execute(state: &AppState, command: ShellCommand) -> Result<(), AppError> {
    match command {
        ShellCommand::Help => println!("{HELP}"),
        ShellCommand::Login(method) => {
            println!(
                "Connecting via {method}... ({} ms)",
                state.auth().delay_for(method).as_millis()
            );
            let user = state.login(method).await?;
            println!("Signed in as {} ({})", user.name, user.wallet.short());
        }
        ShellCommand::Logout => match state.logout()? {
            Some(user) => println!("Signed out {}. Cart cleared.", user.name),
            None => println!("Not signed in."),
        },
        ShellCommand::WhoAmI => match state.session()? {
            Some(user) => println!("{} {} via {}", user.name, user.wallet, user.method),
            None => println!("Not signed in."),
        },
        ShellCommand::Products(search) => {
            catalog::list(state.catalog(), &search, &ProductFilter::All);
        }
        ShellCommand::Add(id, quantity) => {
            let cart = state.add_to_cart(id, quantity)?;
            println!(
                "Added {quantity} to cart. Cart: {} items",
                cart.total_quantity()
            );
        }
        ShellCommand::Cart => {
            let subtotal = state.cart_subtotal()?;
            println!("{}", cart_summary(&state.cart()?, &subtotal.to_string()));
        }
        ShellCommand::Proposals => governance::list(&state.proposals()?),
        ShellCommand::Vote(id, choice) => {
            governance::print_receipt(&state.vote(id, choice)?);
        }
        ShellCommand::Propose(draft) => {
            let proposal = state.create_proposal(draft)?;
            println!("Created proposal #{}, voting ends {}", proposal.id, proposal.end_date);
        }
        ShellCommand::Mint(id) => {
            governance::print_certificate(&state.mint_certificate(id)?);
        }
        ShellCommand::Quit => {}
    }
    Ok(())
}
