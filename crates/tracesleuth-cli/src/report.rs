/// Report rendering: plain text for the operator, CSV for spreadsheets.
///
/// The text layout follows the traditional sweep-report shape: a header
/// with timestamp and machine identity, one block per section with numbered
/// findings, and a summary with a single CLEAN / SUSPICIOUS status line.
use chrono::Local;
use std::fmt::Write as _;
use std::io;
use tracesleuth_core::sweep::SweepReport;

const HEAVY_RULE: &str =
    "===========================================================================";
const LIGHT_RULE: &str =
    "---------------------------------------------------------------------------";

fn env_or_unknown(primary: &str, fallback: &str) -> String {
    std::env::var(primary)
        .or_else(|_| std::env::var(fallback))
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Render the full plain-text report.
pub fn render_text(report: &SweepReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{HEAVY_RULE}");
    let _ = writeln!(out, " TRACESLEUTH SCAN REPORT");
    let _ = writeln!(out, "{HEAVY_RULE}");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  Generated:  {}",
        Local::now().format("%d.%m.%Y %H:%M:%S")
    );
    let _ = writeln!(
        out,
        "  Computer:   {}",
        env_or_unknown("COMPUTERNAME", "HOSTNAME")
    );
    let _ = writeln!(out, "  User:       {}", env_or_unknown("USERNAME", "USER"));
    let _ = writeln!(out);

    for section in &report.sections {
        let _ = writeln!(out, "{LIGHT_RULE}");
        let _ = writeln!(out, " {}", section.label.to_uppercase());
        let _ = writeln!(out, "{LIGHT_RULE}");
        if section.findings.is_empty() {
            let _ = writeln!(out, "  No suspicious entries");
        } else {
            let _ = writeln!(
                out,
                "  FOUND: {} suspicious {}",
                section.findings.len(),
                plural(section.findings.len())
            );
            let _ = writeln!(out);
            for (i, finding) in section.findings.iter().enumerate() {
                let _ = writeln!(out, "    [{}] {}", i + 1, finding);
            }
        }
        let _ = writeln!(
            out,
            "  (scanned {} directories, {} unreadable)",
            section.dirs_scanned, section.unreadable_dirs
        );
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "{HEAVY_RULE}");
    let _ = writeln!(out, " SUMMARY");
    let _ = writeln!(out, "{HEAVY_RULE}");
    let width = report
        .sections
        .iter()
        .map(|s| s.label.len())
        .max()
        .unwrap_or(0);
    for section in &report.sections {
        let _ = writeln!(
            out,
            "  {:<width$}  {}",
            format!("{}:", section.label),
            section.findings.len(),
            width = width + 1
        );
    }
    let _ = writeln!(out);
    let total = report.total_findings();
    if total == 0 {
        let _ = writeln!(out, "  STATUS: CLEAN");
    } else {
        let _ = writeln!(
            out,
            "  STATUS: {total} SUSPICIOUS {} FOUND",
            plural(total).to_uppercase()
        );
    }
    let _ = writeln!(out, "{HEAVY_RULE}");

    out
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        "entry"
    } else {
        "entries"
    }
}

/// Write every finding as a `(section, path)` CSV row.
pub fn write_csv<W: io::Write>(report: &SweepReport, writer: W) -> anyhow::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["section", "path"])?;
    for section in &report.sections {
        for finding in &section.findings {
            csv_writer.write_record([section.label.as_str(), finding.as_str()])?;
        }
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracesleuth_core::sweep::SweepSection;

    fn sample_report() -> SweepReport {
        SweepReport {
            sections: vec![
                SweepSection {
                    label: "AppData".to_string(),
                    findings: vec![
                        r"C:\Users\test\AppData\Roaming\HackLoader.exe".to_string(),
                        r"C:\Users\test\AppData\Local\cheat_tool.dll".to_string(),
                    ],
                    dirs_scanned: 120,
                    unreadable_dirs: 3,
                },
                SweepSection {
                    label: "Prefetch".to_string(),
                    findings: Vec::new(),
                    dirs_scanned: 1,
                    unreadable_dirs: 0,
                },
            ],
        }
    }

    #[test]
    fn text_report_lists_sections_and_findings() {
        let text = render_text(&sample_report());

        assert!(text.contains("TRACESLEUTH SCAN REPORT"));
        assert!(text.contains("APPDATA"));
        assert!(text.contains("PREFETCH"));
        assert!(text.contains("FOUND: 2 suspicious entries"));
        assert!(text.contains(r"[1] C:\Users\test\AppData\Roaming\HackLoader.exe"));
        assert!(text.contains("No suspicious entries"));
        assert!(text.contains("(scanned 120 directories, 3 unreadable)"));
        assert!(text.contains("STATUS: 2 SUSPICIOUS ENTRIES FOUND"));
    }

    #[test]
    fn clean_report_has_clean_status() {
        let report = SweepReport {
            sections: vec![SweepSection {
                label: "System folders".to_string(),
                findings: Vec::new(),
                dirs_scanned: 10,
                unreadable_dirs: 0,
            }],
        };
        let text = render_text(&report);

        assert!(text.contains("STATUS: CLEAN"));
        assert!(!text.contains("FOUND:"));
    }

    #[test]
    fn singular_finding_is_not_pluralised() {
        let mut report = sample_report();
        report.sections[0].findings.truncate(1);
        let text = render_text(&report);

        assert!(text.contains("FOUND: 1 suspicious entry"));
        assert!(text.contains("STATUS: 1 SUSPICIOUS ENTRY FOUND"));
    }

    #[test]
    fn csv_export_has_one_row_per_finding_plus_header() {
        let mut buffer = Vec::new();
        write_csv(&sample_report(), &mut buffer).expect("csv export must succeed");

        let text = String::from_utf8(buffer).expect("csv must be utf-8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "section,path");
        assert!(lines[1].starts_with("AppData,"));
    }
}
