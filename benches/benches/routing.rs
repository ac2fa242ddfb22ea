// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use twine_dom::{Document, InputEvent, InputKind, Key, NodeId};
use twine_elements::Ui;

/// A dropdown nested `depth` levels deep with `items` menu items.
fn nested_dropdown(depth: usize, items: usize) -> (Ui, NodeId, NodeId) {
    let mut doc = Document::new();
    let mut parent = doc.body();
    for _ in 0..depth {
        let div = doc.create_element("div");
        doc.append_child(parent, div);
        parent = div;
    }
    let host = doc.create_element("twc-dropdown");
    let trigger = doc.create_element("button");
    let menu = doc.create_element("div");
    doc.append_child(parent, host);
    doc.append_child(host, trigger);
    doc.append_child(host, menu);
    doc.set_attribute(trigger, "data-target", "twc-dropdown.trigger");
    doc.set_attribute(menu, "data-target", "twc-dropdown.menu");
    for _ in 0..items {
        let item = doc.create_element("div");
        doc.append_child(menu, item);
        doc.set_attribute(item, "data-target", "twc-dropdown.menuItems");
    }
    let mut ui = Ui::with_document(doc);
    ui.mount_all().unwrap();
    (ui, host, trigger)
}

fn bench_click_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("route_click");
    for &depth in &[4_usize, 32, 128] {
        let (mut ui, _, trigger) = nested_dropdown(depth, 8);
        group.bench_function(BenchmarkId::from_parameter(depth), |b| {
            // Two clicks leave the dropdown closed again.
            b.iter(|| {
                black_box(ui.dispatch(InputEvent::new(InputKind::Click, trigger)));
                black_box(ui.dispatch(InputEvent::new(InputKind::Click, trigger)));
            });
        });
    }
    group.finish();
}

fn bench_menu_keyboard(c: &mut Criterion) {
    let mut group = c.benchmark_group("menu_arrow_down");
    for &items in &[8_usize, 64, 512] {
        group.bench_function(BenchmarkId::from_parameter(items), |b| {
            b.iter_batched(
                || {
                    let (mut ui, host, trigger) = nested_dropdown(4, items);
                    ui.focus(trigger);
                    ui.press_key(Key::ArrowDown);
                    (ui, host)
                },
                |(mut ui, host)| {
                    for _ in 0..16 {
                        ui.press_key(Key::ArrowDown);
                    }
                    black_box(ui.active_menu_item(host));
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_click_depth, bench_menu_keyboard);
criterion_main!(benches);
