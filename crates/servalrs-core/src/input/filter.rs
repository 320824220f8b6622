// Servalrs Input Layer - Device Filtering
// Device matching logic for picking the controller out of evdev

/// Check if a device is the one we were asked to drive.
///
/// A device matches when either its name or its path is exactly equal
/// to `wanted`. No substring or case-insensitive matching is done.
///
/// # Arguments
/// * `device_name` - The device name from evdev
/// * `device_path` - The device path (e.g., "/dev/input/event0")
/// * `wanted` - Configured device name or path
pub fn matches_device(device_name: &str, device_path: &str, wanted: &str) -> bool {
    device_name == wanted || device_path == wanted
}

/// Check if a device is our own virtual device.
///
/// The uinput device we create shows up in the evdev enumeration too and
/// must never be picked as the source, otherwise output feeds back in.
pub fn is_virtual_device(name: &str, virtual_name: &str) -> bool {
    name == virtual_name
}
