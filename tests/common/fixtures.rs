#![allow(dead_code)]

use base64::Engine;
use issp_report::{
    DeploymentTable, Document, DocumentBuilder, HeaderGroup, InvestmentGroup, InvestmentTable, KeyValue,
    LabelValueRow, MatrixCell, MatrixRow, MatrixTable, NumberedItem, NumberedTable, PartBuilder, RecordView,
    Row, SectionBuilder, SubRow, Table, TableColumn,
};
use serde_json::{Value, json};
use std::io::Cursor;

pub const TITLE: &str = "Information Systems Strategic Plan";
pub const CYCLE: &str = "ISSP 2024-2026";

/// A solid-colour PNG of the given pixel size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([31, 58, 95]));
    let mut out = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut out, image::ImageFormat::Png)
        .expect("encode test png");
    out.into_inner()
}

pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        mime,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// A saved plan as the web application stores it: some fields blank, one
/// list still in the legacy single-record shape.
pub fn issp_record() -> Value {
    json!({
        "cycle": CYCLE,
        "profile": {
            "visionStatement": "",
            "missionStatement": "Serve students.",
            "orgChart": data_uri("image/png", &png_bytes(40, 20)),
            "strategicGoals": [
                {"key": "digitalCampus", "value": "Every office online by 2026"},
                {"key": "dataGovernance", "value": null},
            ],
        },
        "systems": {"name": "Enrollment System", "status": "Operational", "owner": "Registrar"},
        "projects": [
            {"title": "Campus Network Upgrade", "objective": "Reliable connectivity", "office": "ICT"},
            {"title": "Learning Management System", "objective": "", "office": "Academic Affairs"},
        ],
        "deployment": [
            {"office": "Registrar", "y1": 2, "y2": 1, "y3": 0},
            {"office": "Library", "y1": 1, "y2": null, "y3": 3},
        ],
        "investments": [
            {"item": "Servers", "y1Qty": 2, "y1Cost": 450000, "y2Qty": 1, "y2Cost": 220000},
        ],
        "performance": {
            "uptimeTarget": "99.5%",
            "uptimeActual": "98.7%",
            "ticketsTarget": "500",
            "ticketsActual": "",
        },
        "attachments": {
            "networkDiagram": data_uri("application/pdf", b"%PDF-1.4 not an image"),
        },
    })
}

fn year_columns() -> Vec<TableColumn> {
    vec![
        TableColumn::new("y1", "2024", 0.2).centered(),
        TableColumn::new("y2", "2025", 0.2).centered(),
        TableColumn::new("y3", "2026", 0.2).centered(),
    ]
}

/// The report layout for [`issp_record`], assembled the way a caller would.
pub fn issp_document(record: &Value) -> Document {
    let view = RecordView::new(record);
    let profile = view.at("profile").unwrap_or(view);

    let mut deployment_columns = vec![TableColumn::new("office", "Office", 0.4)];
    deployment_columns.extend(year_columns());

    let organizational = PartBuilder::new("Part I. Organizational Profile")
        .section(SectionBuilder::new("Vision Statement").paragraph(profile.scalar("visionStatement")))
        .section(SectionBuilder::new("Mission Statement").paragraph(profile.scalar("missionStatement")))
        .section(SectionBuilder::new("Strategic Goals").key_values(profile.entries("strategicGoals")))
        .section(SectionBuilder::new("Organizational Chart").image("organizational chart", profile.image("orgChart")));

    let systems = PartBuilder::new("Part II. Information Systems Strategy")
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
            items: view
                .rows("projects")
                .iter()
                .map(|row| {
                    let title = row.get("title").and_then(Value::as_str).unwrap_or_default();
                    let objective = row.get("objective").cloned().unwrap_or(Value::Null);
                    let mut item = NumberedItem::new(title, objective);
                    item.secondary = row.get("office").and_then(Value::as_str).map(str::to_string);
                    item
                })
                .collect(),
        }));

    let resources = PartBuilder::new("Part III. Resource Requirements")
        .section(SectionBuilder::new("Deployment Schedule").deployment(DeploymentTable {
            table: Table::new(deployment_columns, view.rows("deployment"))
                .with_header_group(HeaderGroup::new("Units per Year", 1, 3)),
            min_rows: None,
        }))
        .section(SectionBuilder::new("Investment Plan").investment(InvestmentTable {
            columns: vec![TableColumn::new("item", "Item", 0.28)],
            groups: vec![
                InvestmentGroup {
                    label: "2024".into(),
                    columns: vec![
                        TableColumn::new("y1Qty", "Qty", 0.16).centered(),
                        TableColumn::new("y1Cost", "Cost", 0.2),
                    ],
                },
                InvestmentGroup {
                    label: "2025".into(),
                    columns: vec![
                        TableColumn::new("y2Qty", "Qty", 0.16).centered(),
                        TableColumn::new("y2Cost", "Cost", 0.2),
                    ],
                },
            ],
            rows: view.rows("investments"),
        }))
        .section(SectionBuilder::new("Performance Matrix").matrix(MatrixTable {
            columns: vec![
                TableColumn::new("indicator", "Indicator", 0.4),
                TableColumn::new("target", "Target", 0.3),
                TableColumn::new("actual", "Actual", 0.3),
            ],
            rows: vec![
                MatrixRow {
                    cells: vec![
                        MatrixCell::Literal("System uptime".into()),
                        MatrixCell::keys(["uptimeTarget"]),
                        MatrixCell::keys(["uptimeActual"]),
                    ],
                },
                MatrixRow {
                    cells: vec![
                        MatrixCell::Literal("Help desk tickets".into()),
                        MatrixCell::keys(["ticketsTarget"]),
                        MatrixCell::keys(["ticketsActual"]),
                    ],
                },
            ],
            entries: view.entries("performance"),
        }))
        .section(SectionBuilder::new("Attachments").image("network diagram", view.image("attachments.networkDiagram")));

    let summary = PartBuilder::new("Part IV. Summary").section(SectionBuilder::new("Plan Details").label_value(vec![
        LabelValueRow::new("Plan Cycle", view.scalar("cycle")),
        LabelValueRow::nested(
            "Head of Agency",
            vec![SubRow::new("Name", "Dr. Maria Santos"), SubRow::new("Position", Value::Null)],
        ),
    ]));

    DocumentBuilder::new(TITLE)
        .subtitle(view.scalar("cycle").as_str().unwrap_or(CYCLE))
        .part(organizational)
        .part(systems)
        .part(resources)
        .part(summary)
        .build()
}

/// `count` table rows with short, distinct cells.
pub fn numbered_rows(count: usize) -> Vec<Row> {
    (1..=count)
        .map(|i| Row::from_pairs([("name", json!(format!("System {i}"))), ("status", json!("Active"))]))
        .collect()
}

pub fn simple_columns() -> Vec<TableColumn> {
    vec![
        TableColumn::new("name", "Name", 0.6),
        TableColumn::new("status", "Status", 0.4),
    ]
}

pub fn key_value(key: &str, value: Value) -> KeyValue {
    KeyValue::new(key, value)
}
