use expr_parser::parser::ast::Node;
use rayon::prelude::*;
use tracing::trace;
use crate::error::{error_node_reached, Error};
use super::eval::Eval;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A pair of `(x, y)` values in **graph** units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GraphPoint(pub f64, pub f64);

impl From<(f64, f64)> for GraphPoint {
    fn from((x, y): (f64, f64)) -> GraphPoint {
        GraphPoint(x, y)
    }
}

/// Evaluates the tree at `steps + 1` evenly spaced values of the indeterminate from `start` to
/// `end` inclusive, and returns the points to draw, in order of increasing step.
///
/// Points where the expression is undefined (NaN or infinite) are left out, so gaps in the
/// result correspond to gaps in the domain. The points are evaluated in parallel.
///
/// Returns [`Err`] without evaluating anything if the tree contains a [`Node::Error`].
pub fn sample(tree: &Node, start: f64, end: f64, steps: usize) -> Result<Vec<GraphPoint>, Error> {
    if let Some(offset) = tree.error_offsets().first() {
        return Err(error_node_reached(*offset));
    }

    trace!(start, end, steps, "sampling expression");

    let step_len = if steps == 0 { 0.0 } else { (end - start) / steps as f64 };
    let points = (0..=steps)
        .into_par_iter()
        .map(|i| {
            let x = start + step_len * i as f64;
            tree.eval(x).map(|y| GraphPoint(x, y))
        })
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .filter(|GraphPoint(_, y)| y.is_finite())
        .collect::<Vec<_>>();

    trace!(kept = points.len(), dropped = steps + 1 - points.len(), "sampled expression");
    Ok(points)
}

#[cfg(test)]
mod tests {
    use crate::error::kind::ErrorNodeReached;
    use expr_parser::parse;
    use super::*;

    #[test]
    fn line() {
        let points = sample(&parse("x", "2*x + 1"), 0.0, 4.0, 4).unwrap();
        assert_eq!(points, vec![
            GraphPoint(0.0, 1.0),
            GraphPoint(1.0, 3.0),
            GraphPoint(2.0, 5.0),
            GraphPoint(3.0, 7.0),
            GraphPoint(4.0, 9.0),
        ]);
    }

    #[test]
    fn single_step() {
        let points = sample(&parse("x", "x^2"), 3.0, 10.0, 0).unwrap();
        assert_eq!(points, vec![GraphPoint(3.0, 9.0)]);
    }

    #[test]
    fn drops_undefined_points() {
        let points = sample(&parse("x", "sqrt(x)"), -2.0, 2.0, 4).unwrap();
        let xs = points.iter().map(|GraphPoint(x, _)| *x).collect::<Vec<_>>();
        assert_eq!(xs, vec![0.0, 1.0, 2.0]);

        let points = sample(&parse("x", "1/x"), -1.0, 1.0, 2).unwrap();
        assert_eq!(points, vec![GraphPoint(-1.0, -1.0), GraphPoint(1.0, 1.0)]);
    }

    #[test]
    fn many_points_stay_ordered() {
        let points = sample(&parse("x", "sin(x)"), 0.0, 10.0, 1000).unwrap();
        assert_eq!(points.len(), 1001);
        assert!(points.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }

    #[test]
    fn error_node() {
        let err = sample(&parse("x", "x + (1"), 0.0, 1.0, 10).unwrap_err();
        assert_eq!(err.downcast_kind::<ErrorNodeReached>(), Some(&ErrorNodeReached { offset: 4 }));
    }
}
