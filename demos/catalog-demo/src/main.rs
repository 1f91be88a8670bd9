use std::time::{Duration, Instant};

use catalog::{category_name, FileSection};
use dataset::{load_text, Choice, DatasetStore, FilterState, StatusFlag, UploadedDataset};
use kvstore::InMemoryStorage;
use session::Session;

const DATASET: &str = r#"{"id":"cvdp_agentic_fifo_0001","categories":["cid004","hard"],"prompt":"Add an almost-full flag to the FIFO.","context":{"rtl":{"fifo.sv":"module fifo(...);\nendmodule"}},"patch":{"rtl/fifo.sv":""},"harness":{"src":{"test_fifo.py":"import cocotb"}}}
{"id":"cvdp_copilot_adder_0002","categories":["cid002","easy"],"input":{"prompt":"Complete the adder.","context":{"rtl/adder.sv":"module adder;"}},"output":{"context":{"rtl/adder.sv":"module adder; assign s = a + b; endmodule"}}}
this line is not JSON
{"id":"cvdp_copilot_mux_0003","categories":["cid002"],"input":"Write a 2:1 mux.","output":"assign y = s ? b : a;"}
"#;

fn main() {
    println!("=== CVDP Catalog Demo ===\n");

    let storage = InMemoryStorage::new();
    let mut session = Session::new(DatasetStore::open(storage.clone()));

    // 1. Load
    println!("--- Load ---");
    let report = load_text(DATASET);
    println!("Parsed: {} problems, {} bad line(s) skipped", report.records.len(), report.parse_errors);
    session.install(UploadedDataset {
        file_name: "demo.jsonl".to_string(),
        fingerprint: String::new(),
        report,
    });
    for p in session.store().records() {
        println!(
            "  {:<28} {:<22} {:<6} {}",
            p.title,
            category_name(&p.category),
            p.difficulty,
            p.shape.label()
        );
    }

    // 2. Annotate
    println!("\n--- Annotate ---");
    session.select("cvdp_agentic_fifo_0001");
    println!("Selected: {}", session.selected().map(|p| p.title.as_str()).unwrap_or("-"));
    println!("Auto-expanded patch slots: {:?}", session.view().expansion.patch);
    session.edit_draft("rtl/fifo.sv", "module fifo(...);\n  assign almost_full = count >= DEPTH-1;\nendmodule");
    session.toggle_favorite();
    session.toggle_solved();

    session.select("cvdp_copilot_mux_0003");
    session.toggle_favorite();

    // 3. Filter
    println!("\n--- Filter ---");
    let favorites = FilterState::default().with_status(StatusFlag::Favorite, true);
    session.set_filter(favorites.clone());
    let c = session.counts();
    println!("Favorites: showing {} of {}", c.shown, c.total);

    session.set_filter(favorites.with_status(StatusFlag::Solved, true));
    let c = session.counts();
    println!("Favorite AND solved: showing {} of {}", c.shown, c.total);

    session.set_filter(FilterState::default().with_category(Choice::parse("cid002")));
    println!("Category cid002: {:?}", session.visible().iter().map(|p| p.id.as_str()).collect::<Vec<_>>());

    // 4. Copy feedback
    println!("\n--- Copy ---");
    let t0 = Instant::now();
    session.select("cvdp_agentic_fifo_0001");
    let copied = session.copy_file(FileSection::Patch, "rtl/fifo.sv", t0);
    println!("Copied {} bytes", copied.map(|t| t.len()).unwrap_or(0));
    println!("Copied marker at +1s: {}", session.view().is_copied(FileSection::Patch, "rtl/fifo.sv", t0 + Duration::from_secs(1)));
    println!("Cleared at +2s: {:?}", session.tick(t0 + Duration::from_secs(2)));

    // 5. Reload
    println!("\n--- Reload ---");
    let reopened = Session::new(DatasetStore::open(storage));
    let c = reopened.counts();
    println!("Restored {} problems from {}", c.total, reopened.store().file_name().unwrap_or("-"));
    println!("Filter after reload is default: {}", reopened.view().filter.is_default());
    println!(
        "Draft kept: {}",
        !reopened.store().draft_patch("cvdp_agentic_fifo_0001").is_empty()
    );
}
