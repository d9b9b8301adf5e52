use std::fs;
use std::io::Write;

use assert_matches::assert_matches;
use camino::Utf8PathBuf;
use flate2::Compression;
use flate2::write::GzEncoder;

use flyrnai_screens::domain::{EntityClass, TAXON_ID};
use flyrnai_screens::error::ScreenError;
use flyrnai_screens::pipeline::{Pipeline, PipelineOptions};
use flyrnai_screens::resolver::GeneIdentifierTable;
use flyrnai_screens::screen::DuplicateScreens;
use flyrnai_screens::sink::MemorySink;
use flyrnai_screens::store::{JsonLinesStore, read_items};
use flyrnai_screens::tsv::TsvReader;

fn table() -> GeneIdentifierTable {
    let mut table = GeneIdentifierTable::new();
    table.insert(TAXON_ID, "FBgn0000001", "gA", []);
    table
}

fn rows<'a>(text: &'a str, source: &str) -> TsvReader<&'a [u8]> {
    TsvReader::new(text.as_bytes(), source)
}

#[test]
fn single_screen_end_to_end() {
    let table = table();
    let mut sink = MemorySink::new();
    let summary = Pipeline::new(&table, &mut sink, PipelineOptions::default())
        .run(
            rows("12345\tx\tScreenX\tS2\tdesc\n", "screen details"),
            rows("Amplicon\tGenes\tScreenX\nAMP1\tgA,gB\tY\n", "hits"),
        )
        .unwrap();

    assert_eq!(sink.count(EntityClass::Organism), 1);
    assert_eq!(sink.count(EntityClass::Screen), 1);
    assert_eq!(sink.count(EntityClass::Gene), 1);
    assert_eq!(sink.count(EntityClass::Amplicon), 1);
    assert_eq!(sink.count(EntityClass::ScreenHit), 1);

    let screen = sink.of_class(EntityClass::Screen).next().unwrap();
    assert_eq!(screen.attribute("name"), Some("ScreenX"));
    let gene = sink.of_class(EntityClass::Gene).next().unwrap();
    let amplicon = sink.of_class(EntityClass::Amplicon).next().unwrap();
    assert_eq!(amplicon.attribute("primaryIdentifier"), Some("AMP1"));
    assert_eq!(amplicon.collection("genes"), &[gene.identifier().clone()]);

    let hit = sink.of_class(EntityClass::ScreenHit).next().unwrap();
    assert_eq!(hit.attribute("result"), Some("Hit"));
    assert_eq!(hit.reference("gene"), Some(gene.identifier()));
    assert_eq!(hit.reference("pcrProduct"), Some(amplicon.identifier()));
    assert_eq!(hit.reference("rnaiScreen"), Some(screen.identifier()));

    assert_eq!(summary.item_count("RNAiScreenHit"), 1);
    assert_eq!(summary.item_count("DataSet"), 1);
    assert_eq!(summary.active_screens, vec!["ScreenX"]);
    assert!(summary.screens_without_hits.is_empty());
    assert_eq!(summary.unresolved_genes.get("gB"), Some(&0));
}

#[test]
fn hit_screen_without_details_aborts_the_run() {
    let table = table();
    let mut sink = MemorySink::new();
    let err = Pipeline::new(&table, &mut sink, PipelineOptions::default())
        .run(
            rows("12345\tx\tScreenX\tS2\t\n", "screen details"),
            rows("Amplicon\tGenes\tScreenX\tScreenC\nAMP1\tgA\tY\tN\n", "hits"),
        )
        .unwrap_err();

    assert_matches!(err, ScreenError::ScreenWithoutDetails(screens) if screens == vec!["ScreenC"]);
    assert_eq!(sink.count(EntityClass::Amplicon), 1);
}

#[test]
fn detailed_screen_without_hits_completes() {
    let table = table();
    let mut sink = MemorySink::new();
    let summary = Pipeline::new(&table, &mut sink, PipelineOptions::default())
        .run(
            rows(
                "12345\tx\tScreenX\tS2\t\n12345\tx\tScreenY\tS2\t\n",
                "screen details",
            ),
            rows("Amplicon\tGenes\tScreenX\nAMP1\tgA\tY\n", "hits"),
        )
        .unwrap();

    assert_eq!(summary.screens_without_hits, vec!["ScreenY"]);
    assert_eq!(sink.count(EntityClass::ScreenHit), 1);
}

#[test]
fn strict_mode_rejects_duplicate_screens() {
    let table = table();
    let mut sink = MemorySink::new();
    let options = PipelineOptions {
        duplicate_screens: DuplicateScreens::Reject,
        ..PipelineOptions::default()
    };
    let err = Pipeline::new(&table, &mut sink, options)
        .run(
            rows(
                "1\tx\tScreenX\tS2\t\n2\tx\tScreenX\tS2\t\n",
                "screen details",
            ),
            rows("Amplicon\tGenes\tScreenX\n", "hits"),
        )
        .unwrap_err();
    assert_matches!(err, ScreenError::DuplicateScreen(_));
}

#[test]
fn files_round_trip_through_json_lines_store() {
    let temp = tempfile::tempdir().unwrap();
    let details = temp.path().join("screen_details.tsv");
    let hits = temp.path().join("hits.tsv.gz");
    let output = Utf8PathBuf::from_path_buf(temp.path().join("out").join("items.jsonl")).unwrap();

    fs::write(
        &details,
        "Pubmed_ID\tTitle\tScreen\tCell line\tAnalysis\n12345\tx\tScreenX\tS2\tdesc\n",
    )
    .unwrap();
    let mut encoder = GzEncoder::new(fs::File::create(&hits).unwrap(), Compression::default());
    encoder
        .write_all(b"# DRSC hits\nAmplicon\tGenes\tScreenX\nAMP1\tgA\tS\nAMP2\t\tN\n")
        .unwrap();
    encoder.finish().unwrap();

    let table = table();
    let mut store = JsonLinesStore::create(&output).unwrap();
    let summary = Pipeline::new(&table, &mut store, PipelineOptions::default())
        .run_files(&details, &hits)
        .unwrap();
    assert!(!output.as_std_path().exists());
    let written = store.finish().unwrap();

    let items = read_items(&output).unwrap();
    assert_eq!(items.len(), written);
    assert_eq!(written, summary.items.values().sum::<usize>());
    let results = items
        .iter()
        .filter(|item| item.class() == EntityClass::ScreenHit)
        .filter_map(|item| item.attribute("result"))
        .collect::<Vec<_>>();
    assert_eq!(results, vec!["Strong Hit", "Not a Hit"]);
}

#[test]
fn failed_run_leaves_no_output() {
    let temp = tempfile::tempdir().unwrap();
    let output = Utf8PathBuf::from_path_buf(temp.path().join("items.jsonl")).unwrap();

    let table = table();
    let mut store = JsonLinesStore::create(&output).unwrap();
    let result = Pipeline::new(&table, &mut store, PipelineOptions::default()).run(
        rows("12345\tx\tScreenX\n", "screen details"),
        rows("", "hits"),
    );
    assert_matches!(result, Err(ScreenError::MalformedRow { .. }));
    drop(store);
    assert!(!output.as_std_path().exists());
}

#[test]
fn unreadable_input_names_the_file() {
    let temp = tempfile::tempdir().unwrap();
    let missing = temp.path().join("missing.tsv");

    let table = table();
    let mut sink = MemorySink::new();
    let err = Pipeline::new(&table, &mut sink, PipelineOptions::default())
        .run_files(&missing, &missing)
        .unwrap_err();
    assert_matches!(err, ScreenError::InputRead { path, .. } if path.ends_with("missing.tsv"));
}

#[test]
fn run_without_entities_stores_nothing() {
    let table = table();
    let mut sink = MemorySink::new();
    let summary = Pipeline::new(&table, &mut sink, PipelineOptions::default())
        .run(rows("", "screen details"), rows("# no header\n", "hits"))
        .unwrap();

    assert_eq!(sink.count(EntityClass::Organism), 0);
    assert!(sink.items().is_empty());
    assert_eq!(summary.item_count("Organism"), 0);
}

#[test]
fn tab_only_hits_row_aborts_the_run() {
    let table = table();
    let mut sink = MemorySink::new();
    let err = Pipeline::new(&table, &mut sink, PipelineOptions::default())
        .run(
            rows("12345\tx\tScreenX\tS2\t\n", "screen details"),
            rows("Amplicon\tGenes\tScreenX\nAMP1\tgA\tY\n\t\n", "hits"),
        )
        .unwrap_err();
    assert_matches!(err, ScreenError::MalformedRow { line: 3, expected: 3, actual: 2, .. });
}
