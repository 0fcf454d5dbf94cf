//! Line-oriented shell over one in-memory store.
//!
//! Every command runs against the currently selected month. `plan` and
//! `receipt` go through an edit session each: idle submissions create,
//! `edit <id>` loads a record into a pending form and the next submission
//! merges its fields over that form and updates the record.

use anyhow::{Context, Result, bail};
use budget_core::{
    CompanyDirectory, EditSession, Editable, FieldBag, PlannedItem, Receipt, RecordId, RecordStore,
    Submission, category_breakdown, category_chart, is_month_key, line_item_reconciliation,
    load_demo, month_report,
};
use budget_report::{
    MonthView, export_csv, format_currency, render_categories, render_chart, render_comparison,
    render_planned, render_receipts, render_summary,
};
use regex::Regex;
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

use crate::config::DisplaySection;

const PLANNED_KEYS: &[&str] = &["month", "category", "description", "amount", "owner", "fixed"];
const RECEIPT_KEYS: &[&str] = &["date", "category", "merchant", "amount", "owner", "fixed"];

const HELP: &str = "\
month [YYYY-MM|-]            show, select or clear the current month
income <luana> <gabriel>     replace the month's income
plan key=value...            create a budget line, or update the one being edited
                             keys: month category description amount owner fixed
plan edit|rm <id>            load a budget line into the form / delete it
plan cancel | plan list      drop the pending edit / list the month's budget lines
receipt key=value...         same as plan; keys: date category merchant amount owner fixed
receipt edit|rm|cancel|list
company <category> <name>    register a company
companies [category]         list registered companies
categories                   list categories
summary | breakdown | compare | chart | receipts
report [--json]              every section at once
export <path>                write the month's comparison tables as CSV
demo                         replace everything with the demo month
help | quit
Values with spaces go in double quotes: description=\"Conta de luz\"
";

pub enum Outcome {
    Output(String),
    Quit,
}

/// Splits on whitespace, keeping double-quoted runs together and dropping
/// the quotes: `description="Conta de luz"` is one word.
fn tokenize(line: &str) -> Result<Vec<String>> {
    if line.matches('"').count() % 2 != 0 {
        bail!("unterminated quote");
    }
    let word_re = Regex::new(r#"(?:[^\s"]+|"[^"]*")+"#)?;
    Ok(word_re
        .find_iter(line)
        .map(|m| m.as_str().replace('"', ""))
        .collect())
}

fn parse_fields(args: &[String], keys: &[&str]) -> Result<FieldBag> {
    let mut bag = FieldBag::new();
    for arg in args {
        let Some((key, value)) = arg.split_once('=') else {
            bail!("expected key=value, got \"{arg}\"");
        };
        let key = key.trim().to_lowercase();
        if !keys.contains(&key.as_str()) {
            bail!("unknown field \"{key}\" (expected one of: {})", keys.join(", "));
        }
        bag.set(key, value);
    }
    Ok(bag)
}

fn parse_id(arg: Option<&String>, usage: &str) -> Result<RecordId> {
    let Some(arg) = arg else {
        bail!("usage: {usage}");
    };
    Ok(arg.parse()?)
}

fn show_form(title: &str, form: &FieldBag, keys: &[&str]) -> String {
    let mut out = format!("{title}\n");
    for key in keys {
        out.push_str(&format!("  {key:<12}{}\n", form.get(key)));
    }
    out
}

/// An edit session plus the form it is filling in.
struct Editor<R: Editable> {
    session: EditSession<R>,
    form: FieldBag,
    keys: &'static [&'static str],
}

impl<R: Editable> Editor<R> {
    fn new(keys: &'static [&'static str]) -> Self {
        Self {
            session: EditSession::new(),
            form: FieldBag::new(),
            keys,
        }
    }

    fn begin(&mut self, store: &RecordStore, id: RecordId) -> Result<&FieldBag> {
        let fields = self.session.begin_edit(store, id)?;
        self.form = R::to_form(&fields);
        Ok(&self.form)
    }

    fn submit(&mut self, store: &mut RecordStore, given: &FieldBag) -> Result<String> {
        let mut bag = if self.session.is_idle() {
            FieldBag::new()
        } else {
            self.form.clone()
        };
        bag.merge(given);

        let outcome = self.session.submit_form(store, &bag);
        if self.session.is_idle() {
            self.form = FieldBag::new();
        } else {
            // still editing after a rejected submission: keep what was typed
            self.form = bag;
        }
        Ok(match outcome? {
            Submission::Created(id) => format!("Created {} #{id}.", R::KIND),
            Submission::Updated(id) => format!("Updated {} #{id}.", R::KIND),
        })
    }

    fn pending(&self) -> Option<String> {
        let id = self.session.editing()?;
        Some(show_form(&format!("Editing {} #{id}", R::KIND), &self.form, self.keys))
    }

    fn cancel(&mut self) -> String {
        let was_editing = !self.session.is_idle();
        self.session.cancel();
        self.form = FieldBag::new();
        if was_editing {
            "Edit cancelled.".to_string()
        } else {
            "Nothing to cancel.".to_string()
        }
    }

    fn remove(&mut self, store: &mut RecordStore, id: RecordId) -> String {
        let existed = R::load(store, id).is_some();
        self.session.delete(store, id);
        if self.session.is_idle() {
            self.form = FieldBag::new();
        }
        if existed {
            format!("Deleted {} #{id}.", R::KIND)
        } else {
            format!("No {} #{id}.", R::KIND)
        }
    }

    fn reset(&mut self) {
        self.session.cancel();
        self.form = FieldBag::new();
    }
}

pub struct Shell {
    store: RecordStore,
    directory: CompanyDirectory,
    plan: Editor<PlannedItem>,
    receipt: Editor<Receipt>,
    month: String,
    prefix: String,
    chart_width: usize,
}

impl Shell {
    pub fn new(display: &DisplaySection) -> Self {
        Self {
            store: RecordStore::new(),
            directory: CompanyDirectory::new(),
            plan: Editor::new(PLANNED_KEYS),
            receipt: Editor::new(RECEIPT_KEYS),
            month: String::new(),
            prefix: display.currency_prefix.clone(),
            chart_width: display.chart_width,
        }
    }

    pub fn month(&self) -> &str {
        &self.month
    }

    #[cfg(test)]
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn select_month(&mut self, month: &str) -> Result<()> {
        let month = month.trim();
        if !is_month_key(month) {
            bail!("\"{month}\" is not a YYYY-MM month");
        }
        self.month = month.to_string();
        Ok(())
    }

    pub fn load_demo(&mut self) -> Result<String> {
        let month = load_demo(&mut self.store)?;
        self.plan.reset();
        self.receipt.reset();
        self.month = month.to_string();
        Ok(format!("Loaded demo data for {month}."))
    }

    /// Runs one line. Errors leave the store as it was.
    pub fn execute(&mut self, line: &str) -> Result<Outcome> {
        let outcome = self.dispatch(line);
        if let Err(e) = &outcome {
            warn!(line = line.trim(), error = %e, "command rejected");
        }
        outcome
    }

    fn dispatch(&mut self, line: &str) -> Result<Outcome> {
        let line = line.trim();
        if line.starts_with('#') {
            return Ok(Outcome::Output(String::new()));
        }
        let words = tokenize(line)?;
        let Some((cmd, args)) = words.split_first() else {
            return Ok(Outcome::Output(String::new()));
        };

        let mut out = match cmd.as_str() {
            "month" => self.cmd_month(args)?,
            "income" => self.cmd_income(args)?,
            "plan" => self.cmd_plan(args)?,
            "receipt" => self.cmd_receipt(args)?,
            "company" => self.cmd_company(args)?,
            "companies" => self.cmd_companies(args),
            "categories" => self.directory.categories().join("\n"),
            "summary" => {
                let report = month_report(&self.store, &self.month);
                render_summary(&self.month, &report.totals, &report.balances, &self.prefix)
            }
            "breakdown" => render_categories(&category_breakdown(&self.store, &self.month), &self.prefix),
            "compare" => render_comparison(&line_item_reconciliation(&self.store, &self.month), &self.prefix),
            "chart" => render_chart(&category_chart(&self.store, &self.month), self.chart_width, &self.prefix),
            "receipts" => render_receipts(&self.store.receipts_for(&self.month), &self.prefix),
            "report" => {
                let view = MonthView::build(&self.store, &self.month);
                if args.iter().any(|a| a == "--json") {
                    view.to_json()?
                } else {
                    view.render_text(&self.prefix, self.chart_width)
                }
            }
            "export" => {
                let Some(path) = args.first() else {
                    bail!("usage: export <path>");
                };
                let rows = export_csv(&month_report(&self.store, &self.month), path)?;
                format!("Wrote {rows} rows to {path}.")
            }
            "demo" => self.load_demo()?,
            "help" => HELP.to_string(),
            "quit" | "exit" => return Ok(Outcome::Quit),
            other => bail!("unknown command \"{other}\" (try help)"),
        };

        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        Ok(Outcome::Output(out))
    }

    fn cmd_month(&mut self, args: &[String]) -> Result<String> {
        match args.first().map(String::as_str) {
            None if self.month.is_empty() => Ok("(no month selected)".to_string()),
            None => Ok(self.month.clone()),
            Some("-") => {
                self.month.clear();
                Ok("Month cleared.".to_string())
            }
            Some(m) => {
                self.select_month(m)?;
                Ok(format!("Month set to {}.", self.month))
            }
        }
    }

    fn cmd_income(&mut self, args: &[String]) -> Result<String> {
        if self.month.is_empty() {
            bail!("select a month first (month YYYY-MM)");
        }
        let arg = |i: usize| args.get(i).map(String::as_str).unwrap_or("");
        self.store.replace_income_input(&self.month, arg(0), arg(1))?;

        let parts: Vec<String> = self
            .store
            .income_for(&self.month)
            .iter()
            .map(|i| format!("{} {}", i.owner, format_currency(i.amount, &self.prefix)))
            .collect();
        Ok(format!("Income for {}: {}.", self.month, parts.join(", ")))
    }

    fn cmd_plan(&mut self, args: &[String]) -> Result<String> {
        match args.first().map(String::as_str) {
            None => match self.plan.pending() {
                Some(form) => Ok(form),
                None => bail!("usage: plan key=value... | plan edit <id> | plan cancel | plan rm <id> | plan list"),
            },
            Some("list") => Ok(render_planned(&self.store.planned_for(&self.month), &self.prefix)),
            Some("edit") => {
                let id = parse_id(args.get(1), "plan edit <id>")?;
                let month = self.plan.begin(&self.store, id)?.get("month").to_string();
                self.month = month;
                Ok(self.plan.pending().unwrap_or_default())
            }
            Some("cancel") => Ok(self.plan.cancel()),
            Some("rm") => {
                let id = parse_id(args.get(1), "plan rm <id>")?;
                Ok(self.plan.remove(&mut self.store, id))
            }
            Some(_) => {
                let mut given = parse_fields(args, PLANNED_KEYS)?;
                if self.plan.session.is_idle() && !given.contains("month") {
                    given.set("month", self.month.as_str());
                }
                self.plan.submit(&mut self.store, &given)
            }
        }
    }

    fn cmd_receipt(&mut self, args: &[String]) -> Result<String> {
        match args.first().map(String::as_str) {
            None => match self.receipt.pending() {
                Some(form) => Ok(form),
                None => bail!("usage: receipt key=value... | receipt edit <id> | receipt cancel | receipt rm <id> | receipt list"),
            },
            Some("list") => Ok(render_receipts(&self.store.receipts_for(&self.month), &self.prefix)),
            Some("edit") => {
                let id = parse_id(args.get(1), "receipt edit <id>")?;
                self.receipt.begin(&self.store, id)?;
                Ok(self.receipt.pending().unwrap_or_default())
            }
            Some("cancel") => Ok(self.receipt.cancel()),
            Some("rm") => {
                let id = parse_id(args.get(1), "receipt rm <id>")?;
                Ok(self.receipt.remove(&mut self.store, id))
            }
            Some(_) => {
                let given = parse_fields(args, RECEIPT_KEYS)?;
                self.receipt.submit(&mut self.store, &given)
            }
        }
    }

    fn cmd_company(&mut self, args: &[String]) -> Result<String> {
        let Some((category, name)) = args.split_first() else {
            bail!("usage: company <category> <name>");
        };
        let name = name.join(" ");
        if self.directory.register(category, &name)? {
            Ok(format!("Added {} to {}.", name.trim(), category.trim()))
        } else {
            Ok(format!("{} is already listed under {}.", name.trim(), category.trim()))
        }
    }

    fn cmd_companies(&self, args: &[String]) -> String {
        if let Some(category) = args.first() {
            let names = self.directory.companies(category);
            if names.is_empty() {
                return format!("No companies under {category}.");
            }
            return names.join("\n");
        }
        self.directory
            .categories()
            .into_iter()
            .map(|c| format!("{c}: {}", self.directory.companies(c).join(", ")))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Reads commands from stdin until `quit` or end of input.
pub fn run_interactive(shell: &mut Shell) -> Result<()> {
    info!(month = shell.month(), "shell started");
    println!("budget shell. Type help for commands.");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();
    loop {
        let prompt = if shell.month().is_empty() { "budget" } else { shell.month() };
        print!("{prompt}> ");
        io::stdout().flush().ok();

        line.clear();
        if input.read_line(&mut line).context("read stdin")? == 0 {
            break;
        }
        match shell.execute(&line) {
            Ok(Outcome::Output(out)) => print!("{out}"),
            Ok(Outcome::Quit) => break,
            Err(e) => println!("error: {e:#}"),
        }
    }

    info!("shell finished");
    Ok(())
}

/// Runs a script of shell commands, one per line. Stops at the first failing
/// line and reports where it was.
pub fn run_script<W: Write>(shell: &mut Shell, name: &str, source: &str, out: &mut W) -> Result<()> {
    info!(script = name, "running script");
    for (n, line) in source.lines().enumerate() {
        let outcome = shell
            .execute(line)
            .with_context(|| format!("{name}:{}: {}", n + 1, line.trim()))?;
        match outcome {
            Outcome::Output(text) => out.write_all(text.as_bytes())?,
            Outcome::Quit => break,
        }
    }
    out.flush()?;
    Ok(())
}
