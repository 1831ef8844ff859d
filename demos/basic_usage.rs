//! Basic Usage Example for BMI Gauge
//!
//! Walks through one calculator session: editing fields, switching units,
//! debounced recomputation, gauge geometry, and fetching health tips.
//!
//! Run with: cargo run --example basic_usage
//! Set GEMINI_API_KEY to fetch real tips; without it the fallback tips are shown.
//! Set RUST_LOG=bmi_gauge=debug to see state transitions.

use std::time::{Duration, Instant};

use bmi_gauge::gemini::GeminiClient;
use bmi_gauge::units::{cm_to_ft_in, kg_to_lbs};
use bmi_gauge::{
    CATEGORIES, CalculatorState, Debouncer, GaugeLayout, HealthTips, HeightEdit, HeightUnit,
    TipsState, UnitSwitch, fetch_tips,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("BMI Gauge - Basic Usage Example\n");

    // Example 1: Reference table
    println!("Example 1: Category Table");
    println!("=========================");
    for row in &CATEGORIES {
        println!(
            "{:<14} {:<8} {}",
            row.category.label(),
            row.reference_label(),
            row.color
        );
    }
    println!();

    // Example 2: Unit conversion
    println!("Example 2: Unit Conversion");
    println!("==========================");
    println!("70 kg   = {:?} lbs", kg_to_lbs(70.0));
    println!("182 cm  = {:?}", cm_to_ft_in(182.0));
    println!();

    // Example 3: A debounced session
    println!("Example 3: Session");
    println!("==================");
    let start = Instant::now();
    let mut debouncer = Debouncer::default();
    let mut state = CalculatorState::default();

    // Typing "100" one key at a time, 150 ms apart
    for (i, text) in ["1", "10", "100"].iter().enumerate() {
        state = state.apply_weight_edit(*text);
        debouncer.touch(start + Duration::from_millis(150 * i as u64));
    }
    state = state.apply_height_edit(HeightEdit::Centimeters("160".into()));
    debouncer.touch(start + Duration::from_millis(450));

    if debouncer.poll(start + Duration::from_millis(1000)) {
        state = state.recompute();
    }
    print_state(&state);

    state = state.switch_unit(UnitSwitch::Height(HeightUnit::FeetInches));
    println!(
        "Switched to feet: {} ft {} in (result cleared: {})",
        state.inputs().height_ft,
        state.inputs().height_in,
        state.result().is_none()
    );
    state = state.recompute();
    print_state(&state);
    println!();

    // Example 4: Gauge geometry
    println!("Example 4: Gauge Geometry");
    println!("=========================");
    if let Some(result) = state.result() {
        let reading = result.gauge();
        let layout = GaugeLayout::default();
        println!(
            "Needle: {:.1} degrees (BMI {} shown as {})",
            reading.needle.rotation_degrees, reading.bmi, reading.clamped_bmi
        );
        for (segment, path) in reading.segments.iter().zip(layout.segment_paths()) {
            println!("{:<14} {} d=\"{}\"", segment.category.label(), segment.color, path);
        }
    }
    println!();

    // Example 5: Health tips
    println!("Example 5: Health Tips");
    println!("======================");
    let (loading, request) = state.request_tips();
    state = loading;
    if let Some(request) = request {
        let tips = match GeminiClient::from_env() {
            Ok(client) => fetch_tips(&client, request.bmi, request.category),
            Err(e) => {
                println!("Gemini unavailable ({e}), using fallback tips");
                HealthTips::fallback()
            }
        };
        state = state.receive_tips_result(request.respond(tips));
    }

    if let TipsState::Ready(tips) = state.tips() {
        println!("{}", tips.summary);
        for tip in &tips.tips {
            println!("  - {tip}");
        }
    }
}

fn print_state(state: &CalculatorState) {
    match state.result() {
        Some(result) => println!(
            "BMI {:.1} -> {} ({})",
            result.bmi, result.category, result.color
        ),
        None => println!("Enter weight and height to see your BMI"),
    }
}
