use std::borrow::Cow;

/// Step between kept points when reducing `len` points to about `max_points`.
pub fn stride_for(len: usize, max_points: usize) -> usize {
    let max_points = max_points.max(1);
    len.div_ceil(max_points).max(1)
}

/// Fixed-stride decimation for display.
///
/// Keeps every `ceil(len / max_points)`-th point and always ends on the last
/// input point, so the output holds at most `max_points + 1` points. Input at
/// or under the budget is returned as is.
pub fn decimate<T: Clone>(points: &[T], max_points: usize) -> Cow<'_, [T]> {
    if points.len() <= max_points.max(1) {
        return Cow::Borrowed(points);
    }
    let mut out = Vec::with_capacity(max_points + 1);
    decimate_into(points, max_points, &mut out);
    Cow::Owned(out)
}

/// Same as [`decimate`], writing into a reusable buffer.
pub fn decimate_into<T: Clone>(points: &[T], max_points: usize, output: &mut Vec<T>) {
    output.clear();
    let Some(last_idx) = points.len().checked_sub(1) else {
        return;
    };
    if points.len() <= max_points.max(1) {
        output.extend_from_slice(points);
        return;
    }

    let step = stride_for(points.len(), max_points);
    output.extend(points.iter().step_by(step).cloned());
    // The stride lands on the last index only when it divides `last_idx`.
    if last_idx % step != 0 {
        output.push(points[last_idx].clone());
    }
}
