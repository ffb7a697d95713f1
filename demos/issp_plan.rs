use clap::Parser;
use issp_report::{
    DeploymentTable, Document, DocumentBuilder, HeaderGroup, LabelValueRow, NumberedItem, NumberedTable,
    PartBuilder, RecordView, ReportError, ReportGenerator, SectionBuilder, SubRow, Table, TableColumn, Value,
};
use std::env;
use std::fs;

#[derive(Parser, Debug)]
#[command(version, about = "Render a saved ISSP record to PDF", long_about = None)]
struct Args {
    /// Saved record as JSON
    #[arg(default_value = "demos/data/issp_record.json")]
    record: String,

    /// Render configuration as camelCase JSON
    #[arg(long)]
    config: Option<String>,

    #[arg(short, long, default_value = "issp_plan.pdf")]
    output: String,
}

fn plan_document(record: &Value) -> Document {
    let view = RecordView::new(record);
    let profile = view.at("profile").unwrap_or(view);
    let cycle = view.scalar("cycle");

    let projects = view
        .rows("projects")
        .iter()
        .map(|row| {
            let title = row.get("title").and_then(Value::as_str).unwrap_or_default();
            let mut item = NumberedItem::new(title, row.get("objective").cloned().unwrap_or(Value::Null));
            item.secondary = row.get("office").and_then(Value::as_str).map(str::to_string);
            item
        })
        .collect();

    DocumentBuilder::new("Information Systems Strategic Plan")
        .subtitle(cycle.as_str().unwrap_or_default())
        .part(
            PartBuilder::new("Part I. Organizational Profile")
                .section(SectionBuilder::new("Vision Statement").paragraph(profile.scalar("visionStatement")))
                .section(SectionBuilder::new("Mission Statement").paragraph(profile.scalar("missionStatement")))
                .section(SectionBuilder::new("Strategic Goals").key_values(profile.entries("strategicGoals")))
                .section(
                    SectionBuilder::new("Organizational Chart")
                        .image("organizational chart", profile.image("orgChart")),
                ),
        )
        .part(
            PartBuilder::new("Part II. Information Systems Strategy")
                .section(SectionBuilder::new("Existing Systems").table(Table::new(
                    vec![
                        TableColumn::new("name", "System", 0.4),
                        TableColumn::new("status", "Status", 0.3),
                        TableColumn::new("owner", "Owner", 0.3),
                    ],
                    view.rows("systems"),
                )))
                .section(SectionBuilder::new("Projects").numbered(NumberedTable {
                    headers: None,
                    items: projects,
                })),
        )
        .part(
            PartBuilder::new("Part III. Resource Requirements").section(
                SectionBuilder::new("Deployment Schedule").deployment(DeploymentTable {
                    table: Table::new(
                        vec![
                            TableColumn::new("office", "Office", 0.4),
                            TableColumn::new("y1", "Year 1", 0.2).centered(),
                            TableColumn::new("y2", "Year 2", 0.2).centered(),
                            TableColumn::new("y3", "Year 3", 0.2).centered(),
                        ],
                        view.rows("deployment"),
                    )
                    .with_header_group(HeaderGroup::new("Units per Year", 1, 3)),
                    min_rows: None,
                }),
            ),
        )
        .part(
            PartBuilder::new("Part IV. Summary").section(SectionBuilder::new("Plan Details").label_value(vec![
                LabelValueRow::new("Plan Cycle", cycle.clone()),
                LabelValueRow::nested(
                    "Head of Agency",
                    vec![
                        SubRow::new("Name", view.scalar("head.name")),
                        SubRow::new("Position", view.scalar("head.position")),
                    ],
                ),
            ])),
        )
        .build()
}

fn main() -> Result<(), ReportError> {
    if env::var("RUST_LOG").is_err() {
        unsafe {
            env::set_var("RUST_LOG", "issp_report=info,issp_layout=info");
        }
    }
    env_logger::init();

    let args = Args::parse();

    let generator = match &args.config {
        Some(path) => ReportGenerator::from_config_json(&fs::read_to_string(path)?)?,
        None => ReportGenerator::default(),
    };
    println!("✓ Configuration loaded.");

    let record: Value = serde_json::from_str(&fs::read_to_string(&args.record)?)?;
    let document = plan_document(&record);
    println!("✓ Record loaded: {} parts.", document.parts.len());

    let mut file = fs::File::create(&args.output)?;
    let summary = generator.generate_to(&document, &mut file)?;

    println!(
        "\nSuccess! Generated {} ({} pages, {} tables, {} header replays)",
        args.output, summary.pages, summary.tables, summary.header_replays
    );
    Ok(())
}
