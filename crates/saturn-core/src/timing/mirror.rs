use crate::chart::Chart;

/// Reflect every positioned object across `axis`, in place.
pub(crate) fn mirror_chart(chart: &mut Chart, axis: i32) {
    for note in chart.notes.iter_mut().chain(chart.reverse_notes.iter_mut()) {
        note.mirror(axis);
    }
    for hold in chart.holds.iter_mut().chain(chart.reverse_holds.iter_mut()) {
        hold.mirror(axis);
    }
    for mask in &mut chart.masks {
        mask.mirror(axis);
    }
    for sync in &mut chart.syncs {
        sync.mirror(axis);
    }
}
