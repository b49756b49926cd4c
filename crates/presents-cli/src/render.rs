use std::io::Write;

use presents_assign::{AdultAssignment, AssignmentOutcome, ChildAssignment};
use presents_core::{AdultId, ChildId, Roster};

use crate::CliError;

const SEPARATOR: &str = "===================================";

/// Print the roster listings followed by both assignments.
pub fn render_report<W: Write>(
    roster: &Roster,
    outcome: &AssignmentOutcome,
    out: &mut W,
) -> Result<(), CliError> {
    write_adults(roster, out)?;
    write_families(roster, out)?;
    write_godparents(roster, out)?;
    write_adult_assignments(roster, &outcome.adults, out)?;
    write_child_assignments(roster, &outcome.children, out)?;
    Ok(())
}

fn write_section<W: Write>(out: &mut W, title: &str) -> Result<(), CliError> {
    writeln!(out)?;
    writeln!(out, "{SEPARATOR}")?;
    writeln!(out, "{title}:")?;
    writeln!(out)?;
    Ok(())
}

pub fn write_adults<W: Write>(roster: &Roster, out: &mut W) -> Result<(), CliError> {
    write_section(out, "Adults")?;
    for (_, adult) in roster.adults() {
        match adult.nickname() {
            Some(nickname) => writeln!(out, "{}. {adult} [{nickname}]", adult.initials())?,
            None => writeln!(out, "{}. {adult}", adult.initials())?,
        }
    }
    Ok(())
}

pub fn write_families<W: Write>(roster: &Roster, out: &mut W) -> Result<(), CliError> {
    write_section(out, "Families")?;
    for family in roster.families() {
        let father = roster.adult(family.father())?;
        let mother = roster.adult(family.mother())?;
        write!(
            out,
            "{}: {} and {}",
            roster.family_label(family)?,
            father.display_name(),
            mother.display_name()
        )?;
        if !family.children().is_empty() {
            write!(out, " {}", child_list(roster, family.children().iter().copied())?)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_godparents<W: Write>(roster: &Roster, out: &mut W) -> Result<(), CliError> {
    write_section(out, "God-parents")?;
    for (child, godparents) in roster.godparents() {
        writeln!(
            out,
            "{}: {}",
            roster.child(child)?,
            adult_list(roster, godparents.iter().copied())?
        )?;
    }
    Ok(())
}

pub fn write_adult_assignments<W: Write>(
    roster: &Roster,
    assignment: &AdultAssignment,
    out: &mut W,
) -> Result<(), CliError> {
    write_section(out, "Adults' presents assignments")?;
    for (giver, receiver) in assignment.iter() {
        writeln!(out, "{} => {}", roster.adult(giver)?, roster.adult(receiver)?)?;
    }
    Ok(())
}

pub fn write_child_assignments<W: Write>(
    roster: &Roster,
    assignment: &ChildAssignment,
    out: &mut W,
) -> Result<(), CliError> {
    write_section(out, "Children's presents assignments")?;
    for (giver, children) in assignment.iter() {
        writeln!(
            out,
            "{} => {}",
            roster.adult(giver)?,
            child_list(roster, children.iter().copied())?
        )?;
    }
    Ok(())
}

fn adult_list(
    roster: &Roster,
    ids: impl IntoIterator<Item = AdultId>,
) -> Result<String, CliError> {
    let names = ids
        .into_iter()
        .map(|id| roster.adult(id).map(ToString::to_string))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("[{}]", names.join(", ")))
}

fn child_list(
    roster: &Roster,
    ids: impl IntoIterator<Item = ChildId>,
) -> Result<String, CliError> {
    let names = ids
        .into_iter()
        .map(|id| roster.child(id).map(ToString::to_string))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("[{}]", names.join(", ")))
}
