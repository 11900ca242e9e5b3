use std::fmt::Write as _;

use landalytics_core::{Narrative, ScanView, SwotPoint};

/// Renders the terminal session as a plain-text report.
pub fn render(view: &ScanView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.status_line);

    if let Some(scores) = &view.scores {
        let _ = writeln!(out);
        let _ = writeln!(out, "Scores");
        let width = scores.keys().map(String::len).max().unwrap_or(0);
        for (name, value) in scores {
            let _ = writeln!(out, "  {name:<width$}  {value:>3}");
        }
    }

    if let Some(narrative) = &view.narrative {
        render_narrative(&mut out, narrative);
    }

    out
}

fn render_narrative(out: &mut String, narrative: &Narrative) {
    if let Some(swot) = &narrative.swot {
        render_quadrant(out, "Strengths", &swot.strengths);
        render_quadrant(out, "Weaknesses", &swot.weaknesses);
        render_quadrant(out, "Opportunities", &swot.opportunities);
        render_quadrant(out, "Threats", &swot.threats);
    }

    if let Some(roadmap) = &narrative.roadmap {
        if !roadmap.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Roadmap");
            for (index, step) in roadmap.iter().enumerate() {
                let _ = writeln!(out, "  {}. {}", index + 1, step.task);
                for (label, value) in [
                    ("why", &step.tech_reason),
                    ("impact", &step.psych_impact),
                    ("measure", &step.success_metric),
                ] {
                    if let Some(value) = value {
                        let _ = writeln!(out, "     {label}: {value}");
                    }
                }
            }
        }
    }

    if let Some(verdict) = &narrative.final_verdict {
        let _ = writeln!(out);
        let _ = writeln!(out, "Verdict");
        if let Some(readiness) = &verdict.overall_readiness {
            let _ = writeln!(out, "  {readiness}");
        }
        if let Some(change) = &verdict.single_most_impactful_change {
            let _ = writeln!(out, "  Most impactful change: {change}");
        }
    }
}

fn render_quadrant(out: &mut String, title: &str, points: &[SwotPoint]) {
    if points.is_empty() {
        return;
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{title}");
    for point in points {
        match &point.detail {
            Some(detail) => {
                let _ = writeln!(out, "  - {} ({detail})", point.point);
            }
            None => {
                let _ = writeln!(out, "  - {}", point.point);
            }
        }
    }
}
