//! Integration tests for patchbay-core.
//!
//! Cross-module scenarios: manager queries against registered ports, route
//! publication to the render-thread caches, persistence-tuple rebuilds and
//! port teardown.

use patchbay_core::{
    AudioPort, ControlPort, MidiPort, OwnerId, Port, PortConnection, PortConnectionsManager,
    PortFlags, PortFlow, PortIdentity, PortOwner, PortRegistry, PortType, ProcessingScope,
    StereoPorts, copy_window, is_processing_thread, mix_scaled_window,
};

const BLOCK: usize = 64;

fn fader_out(track: u32) -> StereoPorts {
    StereoPorts::new(
        PortOwner::Fader(OwnerId(track)),
        PortFlow::Output,
        0,
        "stereo_out",
        BLOCK,
    )
}

fn track_in(track: u32) -> StereoPorts {
    StereoPorts::new(
        PortOwner::TrackProcessor(OwnerId(track)),
        PortFlow::Input,
        0,
        "stereo_in",
        BLOCK,
    )
}

// ============================================================================
// 1. End-to-end connect / query / disconnect
// ============================================================================

#[test]
fn connect_query_disconnect() {
    let a = AudioPort::new(
        PortIdentity::new(
            PortOwner::Fader(OwnerId(1)),
            PortType::Audio,
            PortFlow::Output,
            0,
        ),
        "A.out",
        BLOCK,
    );
    let b = AudioPort::new(
        PortIdentity::new(
            PortOwner::TrackProcessor(OwnerId(2)),
            PortType::Audio,
            PortFlow::Input,
            0,
        ),
        "B.in",
        BLOCK,
    );

    let mut mgr = PortConnectionsManager::new();
    mgr.ensure_connect(a.identity(), b.identity(), 1.0, false, true);

    let conn = mgr
        .get_source_or_dest(b.identity(), true)
        .expect("one source");
    assert_eq!(conn.src(), a.identity());

    assert!(mgr.ensure_disconnect(a.identity(), b.identity()));
    assert!(mgr.find_connection(a.identity(), b.identity()).is_none());
    assert!(!mgr.ensure_disconnect(a.identity(), b.identity()));
}

// ============================================================================
// 2. Route publication
// ============================================================================

#[test]
fn published_routes_follow_recalc_not_mutation() {
    let mut reg = PortRegistry::new();
    let out = fader_out(1);
    let inp = track_in(2);
    out.register(&mut reg);
    inp.register(&mut reg);

    let mut mgr = PortConnectionsManager::new();
    mgr.ensure_connect(out.l.identity(), inp.l.identity(), 1.0, true, true);
    mgr.ensure_connect(out.r.identity(), inp.r.identity(), 1.0, true, true);

    // Not yet published: the render side still sees the old (empty) topology.
    assert_eq!(out.l.routes().dest_count(), 0);

    mgr.publish_routes(&reg);
    assert_eq!(out.l.routes().dest_count(), 1);
    assert_eq!(inp.r.routes().src_count(), 1);
    assert_eq!(
        out.r.routes().load().sole_dest().map(|e| e.peer.clone()),
        Some(inp.r.identity().clone())
    );

    mgr.ensure_disconnect_all(out.l.identity());
    assert_eq!(out.l.routes().dest_count(), 1);
    mgr.publish_routes(&reg);
    assert_eq!(out.l.routes().dest_count(), 0);
    assert_eq!(out.r.routes().dest_count(), 1);
}

#[test]
fn render_thread_reads_snapshot_while_control_rewires() {
    let mut reg = PortRegistry::new();
    let out = fader_out(1);
    let inp = track_in(2);
    out.register(&mut reg);
    inp.register(&mut reg);

    let mut mgr = PortConnectionsManager::new();
    mgr.ensure_connect(out.l.identity(), inp.l.identity(), 0.5, false, true);
    mgr.publish_routes(&reg);

    let cache = out.l.routes().clone();
    let reader = std::thread::spawn(move || {
        let _scope = ProcessingScope::enter();
        assert!(is_processing_thread());
        let mut seen = 0;
        for _ in 0..1000 {
            let routes = cache.load();
            // Every snapshot is whole: zero or one destination, never torn.
            assert!(routes.dests.len() <= 1);
            if let Some(entry) = routes.sole_dest() {
                assert!(entry.multiplier == 0.5 || entry.multiplier == 0.25);
                seen += 1;
            }
        }
        seen
    });

    for i in 0..100 {
        if i % 2 == 0 {
            mgr.ensure_disconnect(out.l.identity(), inp.l.identity());
        } else {
            mgr.ensure_connect(out.l.identity(), inp.l.identity(), 0.25, false, true);
        }
        mgr.publish_routes(&reg);
    }

    let seen = reader.join().unwrap();
    assert!(seen <= 1000);
    assert!(!is_processing_thread());
}

#[test]
fn plugin_health_travels_with_route() {
    let mut reg = PortRegistry::new();
    reg.register_track(OwnerId(3), "Bass");
    let plugin = reg.register_plugin(OwnerId(30), "Compressor", Some(OwnerId(3)));

    let send_out = AudioPort::new(
        PortIdentity::new(
            PortOwner::ChannelSend {
                track: OwnerId(1),
                slot: 0,
            },
            PortType::Audio,
            PortFlow::Output,
            0,
        ),
        "send_out",
        BLOCK,
    );
    let sc_in = AudioPort::new(
        PortIdentity::new(
            PortOwner::Plugin(OwnerId(30)),
            PortType::Audio,
            PortFlow::Input,
            2,
        )
        .with_flags(PortFlags::SIDECHAIN)
        .with_port_group("Sidechain"),
        "sc_l",
        BLOCK,
    );
    send_out.register(&mut reg);
    sc_in.register(&mut reg);

    let mut mgr = PortConnectionsManager::new();
    mgr.ensure_connect(send_out.identity(), sc_in.identity(), 1.0, true, true);
    mgr.publish_routes(&reg);

    let routes = send_out.routes().load();
    let entry = routes.sole_dest().unwrap();
    assert!(entry.peer_usable());
    plugin.set_instantiation_failed(true);
    assert!(!entry.peer_usable());

    assert_eq!(
        reg.port_group_designation(OwnerId(30), "Sidechain").unwrap(),
        "Bass/Compressor/Sidechain"
    );
}

// ============================================================================
// 3. Persistence tuples
// ============================================================================

#[test]
fn rebuild_from_serialized_tuples() {
    let out = fader_out(1);
    let inp = track_in(2);

    let mut mgr = PortConnectionsManager::new();
    mgr.ensure_connect(out.l.identity(), inp.l.identity(), 0.8, true, true);
    mgr.ensure_connect(out.r.identity(), inp.r.identity(), 0.6, false, false);

    let json = serde_json::to_string(mgr.connections()).unwrap();
    let mut records: Vec<PortConnection> = serde_json::from_str(&json).unwrap();
    records.reverse();

    let mut loaded = PortConnectionsManager::new();
    loaded.reset_from(records);
    assert_eq!(loaded.len(), 2);
    for conn in mgr.connections() {
        assert!(loaded.contains_connection(conn));
    }
    let r = loaded.get_source_or_dest(inp.r.identity(), true).unwrap();
    assert!(!r.enabled());
    assert_eq!(r.multiplier(), 0.6);
}

#[test]
fn clone_via_reset_is_independent() {
    let out = fader_out(1);
    let inp = track_in(2);
    let mut original = PortConnectionsManager::new();
    original.ensure_connect(out.l.identity(), inp.l.identity(), 1.0, false, true);

    let mut copy = PortConnectionsManager::new();
    copy.reset_connections(Some(&original));
    original.ensure_disconnect_all(out.l.identity());

    assert!(original.is_empty());
    assert_eq!(copy.len(), 1);
    assert!(copy.get_source_or_dest(inp.l.identity(), true).is_some());
}

// ============================================================================
// 4. Teardown and block ops
// ============================================================================

#[test]
fn teardown_processor_ports() {
    let mut reg = PortRegistry::new();
    let out = fader_out(1);
    let inp = track_in(2);
    let midi = MidiPort::new(
        PortIdentity::new(
            PortOwner::Fader(OwnerId(1)),
            PortType::Event,
            PortFlow::Output,
            0,
        ),
        "midi_out",
        16,
    );
    let amount = ControlPort::new(
        PortIdentity::new(
            PortOwner::Fader(OwnerId(1)),
            PortType::Control,
            PortFlow::Input,
            0,
        )
        .with_flags(PortFlags::AMPLITUDE),
        "amp",
        1.0,
    );
    out.register(&mut reg);
    inp.register(&mut reg);
    midi.register(&mut reg);
    amount.register(&mut reg);

    let mut mgr = PortConnectionsManager::new();
    mgr.ensure_connect(out.l.identity(), inp.l.identity(), 1.0, false, true);
    mgr.ensure_connect(out.r.identity(), inp.r.identity(), 1.0, false, true);
    assert!(mgr.verify_ports(&reg).is_ok());

    let (l, r) = out.identities();
    let owned = [
        l.clone(),
        r.clone(),
        midi.identity().clone(),
        amount.identity().clone(),
    ];
    assert_eq!(mgr.ensure_disconnect_all_of(&owned), 2);
    out.unregister(&mut reg);
    midi.unregister(&mut reg);
    amount.unregister(&mut reg);

    assert!(mgr.verify_ports(&reg).is_ok());
    assert!(mgr.is_empty());
}

#[test]
fn windowed_block_ops_stay_in_window() {
    let mut src = fader_out(1);
    let mut dst = track_in(2);
    for (i, s) in src.l.buf_mut().iter_mut().enumerate() {
        *s = i as f32;
    }
    dst.l.buf_mut().fill(9.0);

    copy_window(dst.l.buf_mut(), src.l.buf(), 8, 16);
    assert!(dst.l.buf()[..8].iter().all(|&s| s == 9.0));
    assert_eq!(&dst.l.buf()[8..24], &src.l.buf()[8..24]);
    assert!(dst.l.buf()[24..].iter().all(|&s| s == 9.0));

    dst.clear_buffers();
    mix_scaled_window(dst.r.buf_mut(), src.l.buf(), 0.5, 0, BLOCK);
    for (o, i) in dst.r.buf().iter().zip(src.l.buf()) {
        assert!((o - i * 0.5).abs() < 1e-6);
    }
}
