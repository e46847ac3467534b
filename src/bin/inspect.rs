use std::path::PathBuf;

use clap::Parser;
use record_inspector::{run_inspection, FixtureRecordSource, InspectionRequest};
use record_projection::{ProjectionPolicy, DEFAULT_MAX_SUBLIST_LINES};

/// Project or compare records from a fixture file.
#[derive(Debug, Parser)]
#[command(name = "inspect", version, about)]
struct Args {
    /// Fixture file standing in for the host record store.
    #[arg(long, env = "FIXTURE_PATH", default_value = "fixtures/records.json")]
    fixtures: PathBuf,

    /// Record type, e.g. `customer`.
    record_type: String,

    /// Record id.
    record_id: String,

    /// Second record id; switches to comparison output.
    #[arg(long)]
    compare: Option<String>,

    /// Cap on projected lines per sublist.
    #[arg(long, env = "MAX_SUBLIST_LINES", default_value_t = DEFAULT_MAX_SUBLIST_LINES)]
    max_lines: usize,

    /// Comma-separated field allow-list.
    #[arg(long)]
    fields: Option<String>,

    /// Comma-separated sublist allow-list.
    #[arg(long)]
    sublists: Option<String>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let source = FixtureRecordSource::from_path(&args.fixtures)?;
    let policy = ProjectionPolicy::default().with_max_sublist_lines(args.max_lines);

    let mut request = InspectionRequest::new(args.record_type, args.record_id);
    if let Some(compare_id) = args.compare {
        request = request.comparing(compare_id);
    }
    request.fields = args.fields.as_deref().and_then(InspectionRequest::parse_list);
    request.sublists = args
        .sublists
        .as_deref()
        .and_then(InspectionRequest::parse_list);

    let outcome = run_inspection(&source, &policy, &request);
    let rendered = if args.pretty {
        serde_json::to_string_pretty(&outcome)?
    } else {
        serde_json::to_string(&outcome)?
    };
    println!("{rendered}");

    if !outcome.success() {
        std::process::exit(1);
    }
    Ok(())
}
