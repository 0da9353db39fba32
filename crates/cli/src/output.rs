//! Output formatting for CLI responses

use anyhow::Error;
use colored::*;
use rift_sensor_link::protocol::SensorConfigFlags;
use rift_sensor_link::{DeviceConstants, HidDeviceInfo, LinkState, SensorSession};
use serde_json::json;

use crate::error;

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": format!("{error:#}"),
            "exit_code": error::exit_code(error),
        }
    });
    print_json(&error_json);
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    for cause in error.chain().skip(1) {
        eprintln!("  {} {}", "Caused by:".yellow(), cause);
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format output as JSON: {e}"),
    }
}

pub fn print_device_list(devices: &[HidDeviceInfo], vendor_id: u16, product_id: u16, json: bool) {
    let trackers: Vec<&HidDeviceInfo> = devices
        .iter()
        .filter(|d| d.matches(vendor_id, product_id))
        .collect();

    if json {
        print_json(&json!({
            "success": true,
            "devices": trackers,
        }));
        return;
    }

    if trackers.is_empty() {
        println!("{}", "No trackers found".yellow());
        return;
    }

    println!("{}", "Connected Trackers:".bold());
    for device in trackers {
        println!(
            "  {} {} ({:04x}:{:04x})",
            "●".green(),
            device.display_name().bold(),
            device.vendor_id,
            device.product_id
        );
        println!("    Path: {}", device.path);
        if let Some(serial) = &device.serial_number {
            println!("    Serial: {serial}");
        }
    }
}

pub fn print_info(state: LinkState, constants: &DeviceConstants, keep_alive_ms: u16, json: bool) {
    if json {
        print_json(&json!({
            "success": true,
            "state": state,
            "display_info": constants.display_info,
            "range": constants.range,
            "config": constants.config,
            "keep_alive_interval_ms": keep_alive_ms,
        }));
        return;
    }

    let display = &constants.display_info;
    let range = &constants.range;
    let config = &constants.config;

    println!("{}", "Tracker DK".bold());
    println!("  State: {state:?}");

    println!("{}", "Display".bold());
    println!("  Resolution: {}x{}", display.h_resolution, display.v_resolution);
    println!(
        "  Screen size: {:.5} x {:.5} m (center {:.4} m)",
        display.h_screen_size, display.v_screen_size, display.v_center
    );
    println!("  Lens separation: {:.4} m", display.lens_separation);
    println!(
        "  Eye to screen: {:.4} m ({:.4} eye to lens, {:.4} lens to screen)",
        display.eye_to_screen_distance_total(),
        display.eye_to_lens_distance(),
        display.lens_to_screen_distance()
    );
    println!("  Distortion: {:?} k={:?}", display.distortion_type, display.distortion_k);

    println!("{}", "Sensor range".bold());
    println!("  Accelerometer: ±{} g", range.accel_scale);
    println!("  Gyroscope: ±{} °/s", range.gyro_scale);
    println!("  Magnetometer: ±{} mGauss", range.mag_scale);

    println!("{}", "Sensor config".bold());
    println!("  Flags: {}", format_flags(config.flags));
    println!("  Packet interval: {}", config.packet_interval);
    println!("  Keep-alive: {keep_alive_ms} ms");
}

pub fn print_reading(session: &SensorSession, json: bool) {
    let message = session.latest_message();
    let accel = session.acceleration();
    let gyro = session.angular_velocity();

    if json {
        match serde_json::to_string(&json!({
            "timestamp": message.timestamp,
            "temperature": message.temperature,
            "samples": message.num_samples,
            "acceleration": accel,
            "angular_velocity": gyro,
            "mag": message.mag,
        })) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("Failed to format reading as JSON: {e}"),
        }
        return;
    }

    println!(
        "t={:5} accel=({:8.4}, {:8.4}, {:8.4}) gyro=({:8.4}, {:8.4}, {:8.4})",
        message.timestamp, accel.x, accel.y, accel.z, gyro.x, gyro.y, gyro.z
    );
}

pub fn print_flags_applied(flags: SensorConfigFlags, json: bool) {
    if json {
        print_json(&json!({
            "success": true,
            "flags": flags.bits(),
        }));
    } else {
        println!(
            "{} Sensor flags set to {:#04x} ({})",
            "✓".green(),
            flags.bits(),
            format_flags(flags)
        );
    }
}

/// `0x44 [USE_CALIBRATION | SENSOR_COORDINATES]`, unknown bits shown in hex.
pub fn format_flags(flags: SensorConfigFlags) -> String {
    let mut names: Vec<String> = flags.iter_names().map(|(name, _)| name.to_string()).collect();
    let unknown = flags.bits() & !SensorConfigFlags::all().bits();
    if unknown != 0 {
        names.push(format!("{unknown:#04x}"));
    }
    if names.is_empty() {
        format!("{:#04x}", flags.bits())
    } else {
        format!("{:#04x} [{}]", flags.bits(), names.join(" | "))
    }
}
