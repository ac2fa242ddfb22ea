// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use twine_dom::{Document, NodeId};
use twine_interaction::roving::cycle;
use twine_interaction::{Direction, Marker, RovingList};

/// A menu of `n` items where every third one is disabled.
fn menu(n: usize) -> (Document, RovingList, Vec<NodeId>) {
    let mut doc = Document::new();
    let menu = doc.create_element("div");
    doc.append_child(doc.body(), menu);
    let items: Vec<NodeId> = (0..n)
        .map(|i| {
            let item = doc.create_element("div");
            doc.append_child(menu, item);
            if i % 3 == 1 {
                doc.set_attribute(item, "aria-disabled", "true");
            }
            item
        })
        .collect();
    let mut list = RovingList::new(menu, Marker::Active).with_reference("aria-activedescendant");
    list.set_items(items.clone());
    (doc, list, items)
}

fn bench_cycle_slice(c: &mut Criterion) {
    let mut group = c.benchmark_group("roving_cycle_slice");
    for &n in &[16_usize, 256, 4096] {
        let items: Vec<u32> = (0..n as u32).collect();
        // Only the last item is enabled: the worst case for a full wrap.
        let last = n as u32 - 1;
        group.bench_with_input(BenchmarkId::from_parameter(n), &items, |b, items| {
            b.iter(|| {
                black_box(cycle(items, Some(0), Direction::Next, |i| i == last));
            });
        });
    }
    group.finish();
}

fn bench_cycle_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("roving_cycle_document");
    for &n in &[16_usize, 256, 1024] {
        let (mut doc, list, items) = menu(n);
        group.bench_function(BenchmarkId::new("next_and_activate", n), |b| {
            let mut current = Some(items[0]);
            b.iter(|| {
                current = list.cycle(&doc, current, Direction::Next);
                if let Some(item) = current {
                    list.activate(&mut doc, item);
                }
                black_box(current);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_cycle_slice, bench_cycle_document);
criterion_main!(benches);
