/// Batch prediction example
///
/// Reads every `*.json` answers file in a directory and predicts each.
///
/// Run with:
/// ```
/// cargo run --example batch -- answers/
/// ```

use career_predictor::api::Predictor;
use career_predictor::QuestionnaireAnswer;
use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Career Predictor - Batch Prediction Example\n");

    let dir = std::env::args().nth(1).unwrap_or_else(|| "answers".to_string());

    let predictor = Predictor::new()?;
    println!("✓ Model loaded\n");

    let mut files: Vec<_> = std::fs::read_dir(&dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    println!("Predicting {} answer sets...\n", files.len());

    let start = Instant::now();
    println!("{}", "=".repeat(90));
    println!("{:<40} | {:<45}", "File", "Career");
    println!("{}", "=".repeat(90));

    for path in &files {
        let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        let answer = QuestionnaireAnswer::load(&path.to_string_lossy())?;
        match predictor.predict(&answer) {
            Ok(role) => println!("{:<40} | {:<45}", name, role),
            // one bad file should not stop the batch
            Err(e) if e.is_request_error() => println!("{:<40} | rejected: {}", name, e),
            Err(e) => return Err(e.into()),
        }
    }

    let elapsed = start.elapsed();
    println!("{}", "=".repeat(90));
    println!("\n✓ Batch prediction complete");
    println!(
        "  Time: {:.2}ms ({:.2}ms per answer set)",
        elapsed.as_secs_f64() * 1000.0,
        elapsed.as_secs_f64() * 1000.0 / files.len().max(1) as f64
    );

    Ok(())
}
