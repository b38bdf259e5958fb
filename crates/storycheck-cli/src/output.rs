use serde::Serialize;
use storycheck_core::report::Report;
use storycheck_core::AnalysisResult;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print an analysis as JSON or as the heading / bar / check-lines report.
pub fn print_analysis(result: &AnalysisResult, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(result);
    }
    print!("{}", Report::new(result).render());
    Ok(())
}
