/*
 * Binary entry point: initializes logging, loads the catalog, and runs a
 * small line-oriented terminal adapter around the core. The adapter owns
 * everything the core deliberately does not: rendering the view model,
 * translating user input into `BrowserEvent`s (validating ids before raising
 * them), and saving a generated script to disk.
 */
mod app_logic;
mod core;

use crate::app_logic::{ArchiveBrowserLogic, BrowserEvent, SystemClock, ViewModel};
use crate::core::{Catalog, FacetKey, HeaderCheckState, SortKey};
use simplelog::{ColorChoice, Config, LevelFilter, SimpleLogger, TermLogger, TerminalMode};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::{Arc, Once};

const DEFAULT_CATALOG_PATH: &str = "data/sample_catalog.json";

/// Sets up the global logger once; safe to call from every test.
pub fn initialize_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let level = LevelFilter::Info;
        if TermLogger::init(
            level,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        )
        .is_err()
        {
            let _ = SimpleLogger::init(level, Config::default());
        }
    });
}

fn print_summary(vm: &ViewModel) {
    let header = match vm.header_state {
        HeaderCheckState::Checked => "[x]",
        HeaderCheckState::Indeterminate => "[-]",
        HeaderCheckState::Unchecked => "[ ]",
    };
    println!(
        "{} | {} | {} | {} | header {}",
        vm.summary.results_count_text,
        vm.summary.results_size_text,
        vm.summary.selected_count_text,
        vm.summary.selected_size_text,
        header
    );
}

fn print_rows(vm: &ViewModel) {
    for row in &vm.rows {
        println!(
            "{} #{:<3} {:<40} {:<10} {:<10} {:<8} {:<10} {:<16} {}",
            if row.is_selected { "*" } else { " " },
            row.id,
            row.filename,
            row.region,
            row.disk,
            row.band,
            row.molecule,
            row.data_type,
            row.size_label
        );
    }
    print_summary(vm);
}

fn print_facets(vm: &ViewModel) {
    for group in &vm.facet_groups {
        println!("{}:", group.facet.label());
        for option in &group.options {
            let mark = if option.is_selected { "x" } else { " " };
            let badge = option
                .match_count
                .map(|count| format!(" ({count})"))
                .unwrap_or_default();
            let unavailable = if option.is_available {
                ""
            } else {
                "  [unavailable]"
            };
            println!("  [{mark}] {}{badge}{unavailable}", option.value);
        }
    }
}

fn print_steps(vm: &ViewModel) {
    let describe = |name: &str, step: crate::core::StepIndicator| {
        let state = if step.completed {
            "completed"
        } else if step.active {
            "active"
        } else {
            "pending"
        };
        format!("{name}: {state}")
    };
    println!(
        "{} | {} | {}",
        describe("Filter", vm.workflow.filter),
        describe("Select", vm.workflow.select),
        describe("Download", vm.workflow.download)
    );
}

fn print_help() {
    println!("Commands:");
    println!("  rows                      show the filtered, sorted table");
    println!("  facets                    show facet groups and availability");
    println!("  steps                     show the workflow indicator");
    println!("  filter <facet> <value>    toggle a facet value");
    println!("  all <facet>               select every value of a facet");
    println!("  none <facet>              clear a facet");
    println!("  sort <column>             sort by column (click semantics)");
    println!("  select <id> / deselect <id>");
    println!("  header on|off             header select-all checkbox");
    println!("  selectshown / deselectall");
    println!("  reset                     clear all filters and sorting");
    println!("  generate                  write the download script");
    println!("  quit");
}

/*
 * Maps one input line to an adapter action. Unknown facet/sort names and
 * out-of-range ids are rejected here, at the adapter boundary, so only
 * well-formed events ever reach the core.
 */
fn dispatch_line(line: &str, logic: &mut ArchiveBrowserLogic) -> bool {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return true;
    };
    let rest: Vec<&str> = parts.collect();

    match command {
        "quit" | "exit" => return false,
        "help" => print_help(),
        "rows" => print_rows(&logic.view_model()),
        "facets" => print_facets(&logic.view_model()),
        "steps" => print_steps(&logic.view_model()),
        "filter" => match (rest.first().and_then(|f| FacetKey::parse(f)), rest.len()) {
            (Some(facet), len) if len >= 2 => {
                let value = rest[1..].join(" ");
                let already_selected = logic
                    .session()
                    .filters()
                    .selected_values(facet)
                    .contains(&value);
                logic.handle_event(BrowserEvent::FacetValueToggled {
                    facet,
                    value,
                    is_selected: !already_selected,
                });
                print_summary(&logic.view_model());
            }
            _ => println!("Usage: filter <facet> <value> (facets: region disk band molecule dataType)"),
        },
        "all" | "none" => match rest.first().and_then(|f| FacetKey::parse(f)) {
            Some(facet) => {
                let event = if command == "all" {
                    BrowserEvent::FacetSelectAll { facet }
                } else {
                    BrowserEvent::FacetClear { facet }
                };
                logic.handle_event(event);
                print_summary(&logic.view_model());
            }
            None => println!("Unknown facet. Facets: region disk band molecule dataType"),
        },
        "sort" => match rest.first().and_then(|k| SortKey::parse(k)) {
            Some(key) => {
                logic.handle_event(BrowserEvent::SortColumnClicked { key });
                print_rows(&logic.view_model());
            }
            None => println!(
                "Unknown column. Columns: filename region disk band molecule dataType sizeMB"
            ),
        },
        "select" | "deselect" => match rest.first().and_then(|id| id.parse::<usize>().ok()) {
            Some(id) if id < logic.session().catalog().len() => {
                logic.handle_event(BrowserEvent::RowSelectionToggled {
                    id,
                    is_selected: command == "select",
                });
                print_summary(&logic.view_model());
            }
            _ => println!("Expected a record id between 0 and {}", logic.session().catalog().len() - 1),
        },
        "header" => match rest.first() {
            Some(&"on") | Some(&"off") => {
                logic.handle_event(BrowserEvent::HeaderSelectAllChanged {
                    is_checked: rest[0] == "on",
                });
                print_summary(&logic.view_model());
            }
            _ => println!("Usage: header on|off"),
        },
        "selectshown" => {
            logic.handle_event(BrowserEvent::SelectAllShown);
            print_summary(&logic.view_model());
        }
        "deselectall" => {
            logic.handle_event(BrowserEvent::DeselectAll);
            print_summary(&logic.view_model());
        }
        "reset" => {
            logic.handle_event(BrowserEvent::ResetAllFilters);
            print_summary(&logic.view_model());
        }
        "generate" => {
            if !logic.view_model().generate_enabled {
                println!("Nothing selected; select at least one file first.");
            } else {
                logic.handle_event(BrowserEvent::GenerateScriptRequested);
                match logic.take_pending_script() {
                    Some(script) => match std::fs::write(&script.filename, &script.content) {
                        Ok(()) => println!("Wrote {}", script.filename),
                        Err(e) => log::error!("Failed to write {}: {e}", script.filename),
                    },
                    None => log::error!("Generate produced no script despite a nonempty selection."),
                }
            }
        }
        other => println!("Unknown command '{other}'. Try 'help'."),
    }
    true
}

fn main() {
    initialize_logging();

    let catalog_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH));

    let catalog = match Catalog::load_from_file(&catalog_path) {
        Ok(catalog) => catalog,
        Err(e) => {
            log::error!("Could not load catalog from {catalog_path:?}: {e}");
            std::process::exit(1);
        }
    };
    log::info!(
        "Loaded {} records from {catalog_path:?}.",
        catalog.len()
    );

    let mut logic = ArchiveBrowserLogic::new(catalog, Arc::new(SystemClock));
    print_summary(&logic.view_model());
    print_help();

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break, // EOF
            Ok(_) => {
                if !dispatch_line(line.trim(), &mut logic) {
                    break;
                }
            }
            Err(e) => {
                log::error!("Failed to read input: {e}");
                break;
            }
        }
    }
}
