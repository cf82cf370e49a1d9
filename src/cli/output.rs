//! Plain-text rendering of run reports.

use crate::runner::RunReport;

pub fn print_report(report: &RunReport) {
    print!("{}", format_report(report));
}

pub fn format_report(report: &RunReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("Vertices:  {}\n", report.vertices));
    out.push_str(&format!("Edges:     {}\n", report.edges));
    out.push_str(&format!("Accepted:  {}\n", report.accepted));
    out.push_str(&format!("Rejected:  {}\n", report.rejected));
    out.push_str(&format!(
        "Rollback:  {}\n",
        if report.config.rollback { "on" } else { "off" }
    ));
    out.push_str(&format!(
        "Work:      {} propagations, {} work items, {} raises, {} ledger triggers\n",
        report.stats.propagations,
        report.stats.work_items,
        report.stats.level_raises,
        report.stats.ledger_triggers
    ));
    out.push_str(&format!(
        "Time:      {} ns over {} blocks (x{})\n",
        report.total_nanos,
        report.blocks.len(),
        report.repeat
    ));
    if let (Some(fastest), Some(slowest)) = (
        report.blocks.iter().map(|block| block.min).min(),
        report.blocks.iter().map(|block| block.max).max(),
    ) {
        out.push_str(&format!(
            "Blocks:    {fastest} ns fastest, {slowest} ns slowest\n"
        ));
    }
    if report.verified {
        out.push_str("Verified:  ok\n");
    }
    if let Some(order) = &report.topology {
        let ids: Vec<String> = order.iter().map(|id| id.to_string()).collect();
        out.push_str(&format!("Topology:  {}\n", ids.join(" ")));
    }
    out
}
