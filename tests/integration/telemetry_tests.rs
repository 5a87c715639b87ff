//! Telemetry through the real remote-store adapter (host twin).

use crate::mock_hw::{MockDisplay, MockHardware, RecordingSink};

use irrigation::adapters::remote_store::{RemoteStore, RemoteStoreConfig};
use irrigation::adapters::wifi::{LinkSupervisor, SimWifi};
use irrigation::app::events::AppEvent;
use irrigation::app::service::AppService;
use irrigation::config::{DeviceId, SystemConfig};
use irrigation::error::TransportError;

struct Rig {
    app: AppService,
    hw: MockHardware,
    display: MockDisplay,
    store: RemoteStore,
    sink: RecordingSink,
}

impl Rig {
    fn new(device_id: &str) -> Self {
        let config = SystemConfig {
            device_id: DeviceId::try_from(device_id).unwrap(),
            ..SystemConfig::default()
        };
        let mut store = RemoteStore::new(RemoteStoreConfig {
            host: "garden.example.com".into(),
            auth: "tok".into(),
            timeout_ms: 3_000,
        });
        store.set_link_up(true);
        let mut rig = Self {
            app: AppService::new(config),
            hw: MockHardware::new(),
            display: MockDisplay::default(),
            store,
            sink: RecordingSink::default(),
        };
        rig.app.start(&mut rig.hw, &mut rig.sink);
        rig
    }

    fn run_to(&mut self, to_ms: u64) {
        let mut t = 0;
        while t <= to_ms {
            self.app
                .tick(t, &mut self.hw, &mut self.display, &mut self.store, &mut self.sink);
            t += 10;
        }
    }

    fn last_json(&self) -> serde_json::Value {
        let (_, body) = self.store.sent().last().expect("something was sent");
        serde_json::from_slice(body).unwrap()
    }
}

#[test]
fn pushes_full_snapshot_to_device_node() {
    let mut rig = Rig::new("bed_7");
    rig.hw.set_soil_pct(20);
    rig.hw.set_light_level(500);
    rig.run_to(5_000);

    let (url, _) = &rig.store.sent()[0];
    assert_eq!(url, "https://garden.example.com/devices/bed_7.json?auth=tok");

    let json = rig.last_json();
    assert_eq!(json["deviceId"], "bed_7");
    assert_eq!(json["sensors"]["temperature"], 24.5);
    assert_eq!(json["sensors"]["humidity"], 61.0);
    assert_eq!(json["sensors"]["soilMoisture"], 20);
    assert_eq!(json["sensors"]["lightLevel"], 500);
    assert_eq!(json["sensors"]["valid"], true);
    assert_eq!(json["sensors"]["timestamp"], 4_000);
    assert_eq!(json["actuators"]["pump"], true);
    assert_eq!(json["actuators"]["led"], false);
}

#[test]
fn never_valid_climate_goes_out_as_null() {
    let mut rig = Rig::new("bed_8");
    rig.hw.fail_climate();
    rig.run_to(5_000);

    let json = rig.last_json();
    assert!(json["sensors"]["temperature"].is_null());
    assert!(json["sensors"]["humidity"].is_null());
    assert_eq!(json["sensors"]["valid"], false);
}

#[test]
fn link_down_counts_as_failure_and_recovers() {
    let mut rig = Rig::new("bed_9");
    rig.store.set_link_up(false);
    rig.run_to(10_000);
    assert!(rig.store.sent().is_empty());
    assert_eq!(rig.app.stats().telemetry_failures, 2);
    assert_eq!(rig.app.context().uplink.consecutive_failures, 2);
    assert_eq!(
        rig.app.context().uplink.last_error,
        Some(TransportError::NotConnected)
    );
    assert!(rig.sink.events.contains(&AppEvent::TelemetryFailed {
        error: TransportError::NotConnected,
        consecutive: 2
    }));

    rig.store.set_link_up(true);
    let mut t = 10_010;
    while t <= 15_000 {
        rig.app
            .tick(t, &mut rig.hw, &mut rig.display, &mut rig.store, &mut rig.sink);
        t += 10;
    }
    assert_eq!(rig.store.sent().len(), 1);
    assert!(rig.sink.events.contains(&AppEvent::TelemetrySent { timestamp_ms: 14_000 }));
    assert_eq!(rig.app.context().uplink.consecutive_failures, 0);
}

#[test]
fn rejected_status_is_reported_not_retried_early() {
    let mut rig = Rig::new("bed_10");
    rig.store.sim_fail_with(Some(TransportError::Rejected(401)));
    rig.run_to(9_990);
    assert_eq!(rig.app.stats().telemetry_failures, 1);
    assert_eq!(rig.app.stats().telemetry_pushes, 0);
}

#[test]
fn dropped_link_is_reassociated_and_pushes_resume() {
    let mut rig = Rig::new("bed_11");
    rig.store.set_link_up(false);
    let mut wifi = SimWifi::new();
    wifi.sim_set_ap_reachable(true);
    let mut link = LinkSupervisor::new(rig.app.config().telemetry_interval_ms);

    let drive = |rig: &mut Rig, wifi: &mut SimWifi, link: &mut LinkSupervisor, from: u64, to: u64| {
        let mut t = from;
        while t <= to {
            rig.app
                .tick(t, &mut rig.hw, &mut rig.display, &mut rig.store, &mut rig.sink);
            link.poll(t, wifi, &mut rig.store);
            t += 10;
        }
    };

    drive(&mut rig, &mut wifi, &mut link, 0, 10_000);
    assert_eq!(rig.store.sent().len(), 2, "pushes at 5 s and 10 s");

    // AP disappears: pushes fail, reconnects are paced by the interval.
    wifi.sim_set_ap_reachable(false);
    drive(&mut rig, &mut wifi, &mut link, 10_010, 30_000);
    assert_eq!(rig.store.sent().len(), 2);
    assert!(rig.app.context().uplink.consecutive_failures >= 3);
    let requests_while_down = wifi.requests();
    assert!((4..=6).contains(&requests_while_down), "got {requests_while_down}");

    // AP back: the next retry associates and the next interval delivers.
    wifi.sim_set_ap_reachable(true);
    drive(&mut rig, &mut wifi, &mut link, 30_010, 45_000);
    assert!(rig.store.is_link_up());
    assert!(rig.store.sent().len() >= 3);
    assert_eq!(rig.app.context().uplink.consecutive_failures, 0);
}
