use linkboard::{Editor, EditorConfig, NodeId, Rect};
use std::time::Instant;

fn build_dense_editor(nodes: usize) -> Result<Editor, String> {
    let cfg = EditorConfig { surface: Rect::new(0.0, 0.0, 4000.0, 4000.0), undo_limit: Some(1), ..EditorConfig::default() };
    let mut ed = Editor::new(cfg).expect("default config is valid");
    // Lay nodes out on a grid well clear of the trash corner
    let w = (nodes as f32).sqrt().ceil() as usize;
    for k in 0..nodes {
        let x = 200.0 + (k % w.max(1)) as f32 * 30.0;
        let y = 200.0 + (k / w.max(1)) as f32 * 30.0;
        ed.create_node(x, y, None).map_err(|e| format!("cannot place node {} of {}: {} (grid exceeds the surface)", k, nodes, e))?;
    }
    Ok(ed)
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() { return 0.0; }
    let idx = ((sorted.len() as f64 - 1.0) * p).round() as usize;
    sorted[idx.min(sorted.len()-1)]
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut nodes = 200usize;
    let mut moves = 5000usize;
    let mut assert_ms: Option<f64> = None;
    for a in &args[1..] {
        if let Some(val)=a.strip_prefix("--nodes=") { if let Ok(v)=val.parse() { nodes=v; } }
        else if let Some(val)=a.strip_prefix("--moves=") { if let Ok(v)=val.parse() { moves=v; } }
        else if let Some(val)=a.strip_prefix("--assert-ms=") { if let Ok(v)=val.parse() { assert_ms=Some(v); } }
    }

    let mut ed = match build_dense_editor(nodes) {
        Ok(ed) => ed,
        Err(msg) => { eprintln!("{}", msg); std::process::exit(2); }
    };
    let edges = ed.scene().edge_count();
    let target = NodeId((nodes / 2) as u32);
    let Some(start) = ed.scene().node(target).map(|n| n.position) else {
        eprintln!("no node to drag (nodes={})", nodes);
        std::process::exit(2);
    };
    ed.begin_drag(target, start.x, start.y).expect("node exists");

    let mut times_ms: Vec<f64> = Vec::with_capacity(moves);
    let start_all = Instant::now();
    let mut failed = 0usize;
    for k in 0..moves {
        let x = start.x + (k % 200) as f32 * 1.5;
        let y = start.y + ((k / 200) % 50) as f32 * 1.5;
        let t0 = Instant::now();
        if ed.drag_to(x, y).is_err() { failed += 1; }
        times_ms.push(t0.elapsed().as_secs_f64() * 1000.0);
    }
    if let Err(e) = ed.end_drag(start.x, start.y) {
        eprintln!("end_drag failed: {}", e);
        std::process::exit(2);
    }
    let dur_all = start_all.elapsed().as_secs_f64() * 1000.0;
    times_ms.sort_by(|a,b| a.total_cmp(b));
    let med = percentile(&times_ms, 0.5);
    let p90 = percentile(&times_ms, 0.9);
    let p99 = percentile(&times_ms, 0.99);
    println!("nodes={} edges={} moves={} failed={} total_ms={:.3} median_ms={:.4} p90_ms={:.4} p99_ms={:.4}", nodes, edges, moves, failed, dur_all, med, p90, p99);
    if failed > 0 { eprintln!("FAIL: {} of {} moves were rejected", failed, moves); std::process::exit(1); }
    if let Some(th) = assert_ms { if med > th { eprintln!("FAIL: median {:.4} ms > threshold {:.3} ms", med, th); std::process::exit(1); } }
}
