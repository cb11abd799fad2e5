use super::Host;
use super::common::{CommonArgs, format_verdict, report_policy_problems};
use crate::Result;
use crate::policy::{ConflictSeverity, PolicyDatabase, PolicyRecord, Resolution};
use clap::{ArgGroup, Parser};
use std::io::Write;

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("query").required(true).multiple(true).args(["id", "family", "alias"])))]
pub struct LookupArgs {
    /// Look up a record by SPDX identifier
    #[arg(long, value_name = "ID")]
    pub id: Option<String>,

    /// Look up a record by family, matching any name that contains a family key
    #[arg(long, value_name = "NAME")]
    pub family: Option<String>,

    /// Look up a record by one of its alternate names
    #[arg(long, value_name = "NAME")]
    pub alias: Option<String>,
}

/// Print the record each query resolves to
#[expect(clippy::unnecessary_wraps, reason = "Consistent interface with other subcommands")]
pub fn lookup_policies<H: Host>(host: &mut H, common: &CommonArgs, args: &LookupArgs) -> Result<()> {
    let cell = common.policy_cell(ConflictSeverity::Warn);
    let db = cell.database();

    if let Some(e) = cell.load_error() {
        let _ = writeln!(host.error(), "⚠️  Unable to load license policies: {e}");
    }

    report_policy_problems(host, &db);

    let use_colors = common.color.use_colors();

    if let Some(id) = &args.id {
        report(host, &db, &format!("id '{id}'"), db.find_by_id(id), use_colors);
    }

    if let Some(family) = &args.family {
        report(host, &db, &format!("family '{family}'"), db.find_by_family(family), use_colors);
    }

    if let Some(alias) = &args.alias {
        report(host, &db, &format!("alias '{alias}'"), db.find_by_alias(alias), use_colors);
    }

    Ok(())
}

fn report<H: Host>(host: &mut H, db: &PolicyDatabase, query: &str, resolution: Resolution, use_colors: bool) {
    let (verdict, record) = resolution;
    let mut out = host.output();

    let _ = writeln!(out, "{}  {query}", format_verdict(verdict, use_colors));

    let Some(record) = record else {
        let _ = writeln!(out, "    no matching record");
        return;
    };

    write_record(&mut out, db, &record);
}

fn write_record(out: &mut impl Write, db: &PolicyDatabase, record: &PolicyRecord) {
    if !record.id().is_empty() {
        let _ = writeln!(out, "    id:          {}", record.id());
    }

    if !record.name().is_empty() {
        let _ = writeln!(out, "    name:        {}", record.name());
    }

    let _ = writeln!(out, "    family:      {}", record.family());

    if !record.reference().is_empty() {
        let _ = writeln!(out, "    reference:   {}", record.reference());
    }

    let _ = writeln!(
        out,
        "    flags:       osi={} fsf={} deprecated={}",
        record.osi_approved(),
        record.fsf_libre(),
        record.deprecated()
    );

    if !record.aliases().is_empty() {
        let _ = writeln!(out, "    aliases:     {}", record.aliases().join(", "));
    }

    for note in record.notes() {
        let _ = writeln!(out, "    note:        {note}");
    }

    for url in record.urls() {
        let _ = writeln!(out, "    url:         {url}");
    }

    for name in record.annotation_refs() {
        match db.annotation(name) {
            Some(text) => {
                let _ = writeln!(out, "    {name}: {text}");
            }
            None => {
                let _ = writeln!(out, "    {name}: (no annotation text)");
            }
        }
    }
}
