use slicer_geometry::polyline::Polyline;

/// Cycles all the point index positions forward by `n`. E.g. index 0 becomes 1, last index becomes
/// 0, etc. (only applicable to closed polylines)
pub fn cycle_start_index_forward(input: &Polyline, n: usize) -> Polyline {
    assert!(n > 0, "cycling forward by 0 just returns the same polyline");
    assert!(
        n < input.len(),
        "cycling forward by more than the polyline length is unnecessary"
    );
    assert!(
        input.is_closed(),
        "cycling point index positions not possible with open polyline"
    );
    let points = input.iter().cycle().skip(n).take(input.len()).copied().collect();
    Polyline::from_points(points, input.kind())
}

/// Returns the polyline with its direction reversed.
pub fn reversed(input: &Polyline) -> Polyline {
    let mut result = input.clone();
    result.reverse();
    result
}

/// Every start index cycle of `input` in both directions, used to check that results do not
/// depend on where a closed polyline starts or which way it winds.
pub fn all_cycles(input: &Polyline) -> Vec<Polyline> {
    let mut result = vec![input.clone(), reversed(input)];
    for n in 1..input.len() {
        let cycled = cycle_start_index_forward(input, n);
        result.push(reversed(&cycled));
        result.push(cycled);
    }
    result
}
