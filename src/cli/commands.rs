use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::app::App;
use crate::catalog::{visible, Catalog, Category, FilterMode, ItemId};
use crate::config::AppConfig;
use crate::progress::ProgressStore;

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Only list one section (common or unique)
    #[arg(long)]
    pub category: Option<Category>,
    /// Which items to show (all, pending, done)
    #[arg(long, default_value = "all")]
    pub filter: FilterMode,
    /// Identifiers to treat as completed, e.g. --done c0,c1,u5
    #[arg(long, value_delimiter = ',')]
    pub done: Vec<ItemId>,
    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SummaryArgs {
    /// Completed identifiers (c0, u5, ...)
    #[arg()]
    pub done: Vec<ItemId>,
}

#[derive(Debug, Serialize)]
struct ListedItem<'a> {
    id: String,
    category: Category,
    text: &'a str,
    completed: bool,
}

pub fn run_tui(config: Arc<AppConfig>, catalog: Catalog) -> Result<()> {
    if !atty::is(atty::Stream::Stdout) {
        bail!("the interactive tracker needs a terminal; try `studytrack list` instead");
    }
    let mut app = App::new(config, catalog);
    app.run()
}

pub fn list_items(catalog: &Catalog, args: ListArgs) -> Result<()> {
    let output = render_list(catalog, &args)?;
    print!("{output}");
    Ok(())
}

pub fn print_summary(catalog: &Catalog, args: SummaryArgs) -> Result<()> {
    let output = render_summary(catalog, &args.done)?;
    print!("{output}");
    Ok(())
}

fn progress_from(catalog: &Catalog, ids: &[ItemId]) -> Result<ProgressStore> {
    let mut progress = ProgressStore::new();
    for id in ids {
        if !catalog.contains(*id) {
            bail!("unknown question identifier '{id}'");
        }
        if progress.is_completed(*id) {
            tracing::warn!(%id, "identifier given more than once, counting it once");
            continue;
        }
        progress.toggle(*id);
    }
    Ok(progress)
}

fn render_list(catalog: &Catalog, args: &ListArgs) -> Result<String> {
    let progress = progress_from(catalog, &args.done)?;
    let categories: Vec<Category> = match args.category {
        Some(category) => vec![category],
        None => Category::iter().collect(),
    };

    let mut listed = Vec::new();
    for category in &categories {
        for (id, text) in catalog.items(*category) {
            let completed = progress.is_completed(id);
            if visible(completed, args.filter) {
                listed.push(ListedItem {
                    id: id.to_string(),
                    category: *category,
                    text,
                    completed,
                });
            }
        }
    }

    if args.json {
        let mut out = serde_json::to_string_pretty(&listed).context("serializing item list")?;
        out.push('\n');
        return Ok(out);
    }

    if listed.is_empty() {
        return Ok("No questions match.\n".to_string());
    }
    let mut out = String::new();
    let mut current = None;
    for item in &listed {
        if current != Some(item.category) {
            let counts = progress.section_count(catalog, item.category);
            let _ = writeln!(
                &mut out,
                "{} {} ({}/{} completed)",
                item.category.icon(),
                item.category.title(),
                counts,
                catalog.len(item.category)
            );
            current = Some(item.category);
        }
        let mark = if item.completed { "x" } else { " " };
        let _ = writeln!(&mut out, "  [{mark}] {:<4} {}", item.id, item.text);
    }
    Ok(out)
}

fn render_summary(catalog: &Catalog, ids: &[ItemId]) -> Result<String> {
    let progress = progress_from(catalog, ids)?;
    let mut out = String::new();
    let _ = writeln!(
        &mut out,
        "{} of {} questions completed ({}%)",
        progress.done_count(catalog),
        catalog.total(),
        progress.percent_complete(catalog)
    );
    for category in Category::iter() {
        let _ = writeln!(
            &mut out,
            "  {:<7} {}/{}",
            category.to_string(),
            progress.section_count(catalog, category),
            catalog.len(category)
        );
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult<T = ()> = anyhow::Result<T>;

    fn ids(raw: &[&str]) -> TestResult<Vec<ItemId>> {
        raw.iter()
            .map(|r| r.parse::<ItemId>().map_err(anyhow::Error::from))
            .collect()
    }

    fn list_args(filter: FilterMode, done: &[&str]) -> TestResult<ListArgs> {
        Ok(ListArgs {
            category: None,
            filter,
            done: ids(done)?,
            json: false,
        })
    }

    #[test]
    fn summary_reports_percent_and_sections() -> TestResult {
        let catalog = Catalog::builtin();
        let output = render_summary(&catalog, &ids(&["c0", "c1", "u5"])?)?;
        assert!(output.starts_with("3 of 63 questions completed (5%)"));
        assert!(output.contains("common  2/35"));
        assert!(output.contains("unique  1/28"));
        Ok(())
    }

    #[test]
    fn summary_rejects_unknown_ids() -> TestResult {
        let catalog = Catalog::builtin();
        let err = render_summary(&catalog, &ids(&["c0", "u28"])?).unwrap_err();
        assert!(err.to_string().contains("u28"));
        Ok(())
    }

    #[test]
    fn duplicate_ids_count_once() -> TestResult {
        let catalog = Catalog::builtin();
        let output = render_summary(&catalog, &ids(&["c3", "c3"])?)?;
        assert!(output.starts_with("1 of 63"));
        Ok(())
    }

    #[test]
    fn list_done_filter_shows_only_completed() -> TestResult {
        let catalog = Catalog::builtin();
        let output = render_list(&catalog, &list_args(FilterMode::Done, &["c1", "u0"])?)?;
        assert!(output.contains("[x] c1"));
        assert!(output.contains("[x] u0"));
        assert!(!output.contains("[ ]"));
        assert!(output.contains("(1/35 completed)"));
        Ok(())
    }

    #[test]
    fn list_pending_filter_hides_completed() -> TestResult {
        let catalog = Catalog::builtin();
        let output = render_list(&catalog, &list_args(FilterMode::Pending, &["c1"])?)?;
        assert!(!output.contains(" c1 "));
        assert_eq!(output.matches("[ ]").count(), 62);
        Ok(())
    }

    #[test]
    fn list_json_for_single_category() -> TestResult {
        let catalog = Catalog::builtin();
        let mut args = list_args(FilterMode::All, &["u2"])?;
        args.category = Some(Category::Unique);
        args.json = true;
        let output = render_list(&catalog, &args)?;
        let parsed: serde_json::Value = serde_json::from_str(&output)?;
        let items = parsed.as_array().context("array output")?;
        assert_eq!(items.len(), 28);
        assert_eq!(items[2]["id"], "u2");
        assert_eq!(items[2]["completed"], true);
        assert_eq!(items[2]["category"], "unique");
        Ok(())
    }
}
