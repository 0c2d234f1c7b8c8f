/// Simple example of using the career predictor library
///
/// Train first, then run with:
/// ```
/// cargo run --example simple
/// ```
use career_predictor::api::Predictor;
use career_predictor::questionnaire::*;
use career_predictor::QuestionnaireAnswer;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Career Predictor - Simple Example\n");

    println!("Loading model...");
    let predictor = Predictor::new()?;
    println!("✓ {}", predictor.model_info());

    let answer = QuestionnaireAnswer::new()
        .with(LOGICAL_QUOTIENT, 8)
        .with(CODING_SKILLS, 9)
        .with(HACKATHONS, 4)
        .with(PUBLIC_SPEAKING, 3)
        .with(SELF_LEARNING, "yes")
        .with(EXTRA_COURSES, "yes")
        .with(SENIOR_INPUTS, "no")
        .with(WORKED_IN_TEAMS, "yes")
        .with(INTROVERT, "yes")
        .with(READING_WRITING, "medium")
        .with(MEMORY_SCORE, "excellent")
        .with(CERTIFICATIONS, "python")
        .with(WORKSHOPS, "cloud computing")
        .with(INTERESTED_SUBJECTS, "programming")
        .with(CAREER_AREA, "system developer")
        .with(COMPANY_TYPE, "Product based")
        .with(BOOK_TYPE, "Technical")
        .with(MANAGEMENT_OR_TECHNICAL, "Technical")
        .with(HARD_OR_SMART, "smart worker");

    println!("{}", "=".repeat(70));
    match predictor.predict(&answer) {
        Ok(role) => println!("Predicted career: {}\n", role),
        Err(e) if e.is_request_error() => {
            println!("Answers rejected: {}", e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    println!("Top matches:");
    for ranked in predictor.predict_ranked(&answer, 5)? {
        println!("  {:<45} {:>5.1}%", ranked.label, ranked.probability * 100.0);
    }
    println!("{}", "-".repeat(70));

    println!("\n✓ Done!");

    Ok(())
}
