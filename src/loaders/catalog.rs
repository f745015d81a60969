use crate::model::{Assignment, AssignmentId, Catalog};
use tracing::{debug, trace, warn};

/// Build the catalog from raw lines taken three at a time: name, id, points.
///
/// A trailing incomplete group is dropped. Groups with unusable points, an
/// empty field, or an id or name already in the catalog are skipped.
pub fn parse_catalog<I, S>(lines: I) -> Catalog
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let lines = lines
        .into_iter()
        .map(|l| l.as_ref().trim().to_owned())
        .collect::<Vec<_>>();
    let mut catalog = Catalog::default();
    for (group, chunk) in lines.chunks_exact(3).enumerate() {
        let line = group * 3 + 1;
        let [name, id, points] = chunk else {
            continue;
        };
        if name.is_empty() && id.is_empty() && points.is_empty() {
            debug!(line, "blank assignment group ignored");
            continue;
        }
        match parse_assignment(name, id, points) {
            Ok(assignment) => {
                trace!(line, id = %assignment.id, name = %assignment.name, "assignment read");
                if let Err(assignment) = catalog.insert(assignment) {
                    warn!(
                        line,
                        id = %assignment.id,
                        name = %assignment.name,
                        "assignment id or name already defined, skipping"
                    );
                }
            }
            Err(reason) => warn!(line, %reason, "skipping assignment"),
        }
    }
    let trailing = lines.len() % 3;
    if trailing != 0 {
        debug!(trailing, "incomplete trailing assignment group dropped");
    }
    catalog
}

fn parse_assignment(name: &str, id: &str, points: &str) -> Result<Assignment, String> {
    if name.is_empty() || id.is_empty() {
        return Err("empty assignment name or id".to_owned());
    }
    let points = points
        .parse::<i64>()
        .map_err(|_| format!("points {points:?} are not an integer"))?;
    let max_points = u32::try_from(points)
        .ok()
        .filter(|&p| p > 0)
        .ok_or_else(|| format!("points must be positive, got {points}"))?;
    Ok(Assignment {
        id: AssignmentId(id.to_owned()),
        name: name.to_owned(),
        max_points,
    })
}
