//! End-to-end tests for catalogue extraction and search.
//!
//! Builds raw tables shaped like the wiki trading page (caption row,
//! column-title row, five level groups with row spans) and runs them
//! through extraction, serialization and queries.

use pretty_assertions::assert_eq;

use villager_trades_catalogue::query::{search, Criterion};
use villager_trades_catalogue::{
    default_grouping_rules, extract_catalogue, Catalogue, CatalogueError, ItemRef, RawCell,
    RawRow, RawTable, TableLayout,
};

const LEVELS: [&str; 5] = ["Novice", "Apprentice", "Journeyman", "Expert", "Master"];

/// One exchange row: wanted, quantity, multiplier, given, quantity, uses, xp.
type Cells = [&'static str; 7];

fn trade_table(caption: &str, levels: [Vec<Cells>; 5]) -> RawTable {
    let mut rows = vec![
        RawRow::from_texts(&[caption]),
        RawRow::from_texts(&[
            "Level",
            "Item wanted",
            "Default quantity",
            "Price multiplier",
            "Item given",
            "Quantity",
            "Trades until disabled",
            "XP to villager",
        ]),
    ];

    for (label, exchanges) in LEVELS.iter().zip(levels) {
        let span = exchanges.len();
        for (i, cells) in exchanges.iter().enumerate() {
            let mut row: Vec<RawCell> = Vec::new();
            if i == 0 {
                let mut label_cell = RawCell::new(*label);
                if span > 1 {
                    label_cell = label_cell.with_row_span(span.to_string());
                }
                row.push(label_cell);
            }
            row.extend(cells.iter().map(|c| RawCell::new(*c)));
            rows.push(RawRow::new(row));
        }
    }

    RawTable::new(rows)
}

fn farmer() -> RawTable {
    trade_table(
        "Farmer Economic Trade",
        [
            vec![
                ["Oak Log", "6", "0.05", "Emerald", "1", "16", "2"],
                ["Spruce Log[note 1]", "6", "0.05", "Emerald", "1", "16", "2"],
            ],
            vec![["Pumpkin", "6", "0.05", "Emerald", "1", "12", "10"]],
            vec![
                ["Melon", "4", "0.05", "Emerald", "1", "12", "20"],
                ["Emerald", "1", "0.05", "Cookie", "18", "12", "15"],
            ],
            vec![["Emerald", "1", "0.05", "Suspicious Stew", "1", "12", "15"]],
            vec![["Emerald", "3", "0.05", "Golden Carrot", "3", "12", "30"]],
        ],
    )
}

fn fletcher() -> RawTable {
    trade_table(
        "Fletcher Economic Trade",
        [
            vec![
                ["Stick\nEmerald", "32\n1", "0.05", "Emerald", "1", "16", "2"],
                ["Emerald\nGravel", "1\n10", "0.05", "Flint", "10", "12", "1"],
            ],
            vec![["Flint", "26", "0.05", "Emerald", "1", "12", "10"]],
            vec![["String", "14", "0.05", "Emerald", "1", "16", "20"]],
            vec![["Feather", "24", "0.05", "Emerald", "1", "16", "30"]],
            vec![["Tripwire Hook", "8", "0.05", "Emerald", "1", "12", "30"]],
        ],
    )
}

fn fisherman() -> RawTable {
    trade_table(
        "Fisherman Economic Trade",
        [
            vec![["String", "20", "0.05", "Emerald", "1", "16", "2"]],
            vec![["Coal", "10", "0.05", "Emerald", "1", "16", "10"]],
            vec![["Raw Salmon", "13", "0.05", "Emerald", "1", "16", "20"]],
            vec![["Tropical Fish", "6", "0.05", "Emerald", "1", "12", "30"]],
            vec![[
                "Boat of the\nvillager's biome[note 4]",
                "1",
                "0.05",
                "Emerald",
                "1",
                "12",
                "30",
            ]],
        ],
    )
}

fn job_sites() -> Vec<String> {
    vec![
        "Composter".to_string(),
        "Fletching Table".to_string(),
        "Barrel".to_string(),
    ]
}

fn extract() -> Catalogue {
    extract_catalogue(
        &job_sites(),
        &[farmer(), fletcher(), fisherman()],
        &TableLayout::default(),
        &default_grouping_rules(),
    )
    .expect("fixture tables are well formed")
}

#[test]
fn test_every_record_has_five_levels() {
    let catalogue = extract();
    assert_eq!(catalogue.len(), 3);

    for record in &catalogue {
        assert_eq!(record.trades.len(), 5, "{}", record.profession);
        for level in &record.trades {
            assert!(!level.exchanges.is_empty());
            for exchange in &level.exchanges {
                assert_eq!(
                    exchange.wanted.items.len(),
                    exchange.wanted.default_quantities.len()
                );
            }
        }
    }
}

#[test]
fn test_two_row_group_decodes_into_one_level() {
    let catalogue = extract();
    let farmer = catalogue.profession("farmer").unwrap();
    let novice = &farmer.trades[0];

    assert_eq!(novice.level_name, "novice");
    assert_eq!(novice.exchanges.len(), 2);
    assert_eq!(novice.exchanges[0].wanted.items, vec![ItemRef::new("oak log")]);
    assert_eq!(novice.exchanges[1].wanted.items, vec![ItemRef::new("spruce log")]);
    assert_eq!(novice.exchanges[0].given.item.name(), "emerald");
    assert_eq!(novice.exchanges[1].given.item.name(), "emerald");
}

#[test]
fn test_level_names_and_job_sites() {
    let catalogue = extract();
    let fletcher = catalogue.profession("fletcher").unwrap();

    assert_eq!(fletcher.job_site_block, "fletching table");
    let names: Vec<_> = fletcher.trades.iter().map(|t| t.level_name.as_str()).collect();
    assert_eq!(
        names,
        vec!["novice", "apprentice", "journeyman", "expert", "master"]
    );
}

#[test]
fn test_fisherman_master_is_joined() {
    let catalogue = extract();
    let fisherman = catalogue.profession("fisherman").unwrap();
    let master = &fisherman.trades[4].exchanges[0];

    assert_eq!(
        master.wanted.items,
        vec![ItemRef::new("boat of the villager's biome")]
    );
}

#[test]
fn test_json_round_trip() {
    let catalogue = extract();
    let json = catalogue.to_json_pretty().unwrap();
    let restored = Catalogue::from_json(&json).unwrap();
    assert_eq!(restored, catalogue);
}

#[test]
fn test_re_extraction_is_structurally_equal() {
    assert_eq!(extract(), extract());
}

#[test]
fn test_search_scenarios() {
    let catalogue = extract();

    let farmers = search(&catalogue, Criterion::Profession, &["farmer"]);
    assert_eq!(farmers.len(), 1);
    assert_eq!(&farmers.professions()[0], catalogue.profession("farmer").unwrap());

    let sticks = search(&catalogue, Criterion::Wanted, &["stick"]);
    assert_eq!(sticks.len(), 1);
    let exchange = &sticks.professions()[0].trades[0].exchanges[0];
    assert_eq!(
        exchange.wanted.items,
        vec![ItemRef::new("stick"), ItemRef::new("emerald")]
    );

    let flint = search(&catalogue, Criterion::Given, &["flint"]);
    assert_eq!(flint.len(), 1);
    assert_eq!(flint.professions()[0].profession, "fletcher");

    assert!(search(&catalogue, Criterion::Wanted, &["nonexistent-item-xyz"]).is_empty());
}

#[test]
fn test_missing_level_aborts_extraction() {
    let mut broken = farmer();
    broken.rows.pop();

    let err = extract_catalogue(
        &job_sites(),
        &[fletcher(), broken, fisherman()],
        &TableLayout::default(),
        &default_grouping_rules(),
    )
    .unwrap_err();

    let CatalogueError::MalformedTable {
        table, profession, ..
    } = err
    else {
        panic!("expected MalformedTable, got {err:?}");
    };
    assert_eq!(table, Some(1));
    assert_eq!(profession.as_deref(), Some("farmer"));
}

#[test]
fn test_job_site_count_mismatch() {
    let err = extract_catalogue(
        &job_sites()[..2],
        &[farmer(), fletcher(), fisherman()],
        &TableLayout::default(),
        &default_grouping_rules(),
    )
    .unwrap_err();

    assert_eq!(
        err,
        CatalogueError::IndexMismatch {
            job_sites: 2,
            tables: 3
        }
    );
}
