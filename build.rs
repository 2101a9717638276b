use std::cmp::Ordering;
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

// CPU features we want to detect
#[derive(PartialEq, Eq, Debug)]
struct CpuFeature {
    name: &'static str,
    cfg_flag: &'static str,
    vector_bits: usize,
    detected: bool,
}

impl CpuFeature {
    // Define priority order between CPU Features (Lowest number == Highest Priority)
    fn priority(&self) -> usize {
        match self.name {
            "avx512f" => 0,
            "avx2" => 1,
            "sse4_1" => 2,
            "neon" => 3,
            _ => usize::MAX, // lowest priority by default
        }
    }

    // Groups all CPU features whose register width decides the preferred shape
    fn features() -> Vec<CpuFeature> {
        vec![
            CpuFeature {
                name: "sse4_1",
                cfg_flag: "sse",
                vector_bits: 128,
                detected: false,
            },
            CpuFeature {
                name: "avx512f",
                cfg_flag: "avx512",
                vector_bits: 512,
                detected: false,
            },
            CpuFeature {
                name: "avx2",
                cfg_flag: "avx2",
                vector_bits: 256,
                detected: false,
            },
            CpuFeature {
                name: "neon",
                cfg_flag: "neon",
                vector_bits: 128,
                detected: false,
            },
        ]
    }
}

impl Ord for CpuFeature {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority().cmp(&other.priority())
    }
}

impl PartialOrd for CpuFeature {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Feature detection trait to make implementations more modular
trait CpuFeatureDetector {
    fn detect_features(&self, features: &mut [CpuFeature]);
    fn is_applicable(&self) -> bool;
}

// Linux CPU feature detector
struct LinuxDetector;
impl CpuFeatureDetector for LinuxDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        if let Ok(cpuinfo) = std::fs::read_to_string("/proc/cpuinfo") {
            let contents = cpuinfo.to_lowercase();
            for feature in features.iter_mut() {
                // aarch64 kernels report NEON as "asimd"
                feature.detected = match feature.name {
                    "neon" => contents.contains("asimd") || contents.contains(" neon"),
                    name => contents.contains(name),
                };
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "linux")
    }
}

// macOS CPU feature detector
struct MacOSDetector;
impl CpuFeatureDetector for MacOSDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        let output = Command::new("sysctl").args(["-a"]).output();

        if let Ok(output) = output {
            let contents = String::from_utf8_lossy(&output.stdout).to_lowercase();

            for feature in features.iter_mut() {
                match feature.name {
                    "avx512f" => feature.detected = contents.contains("hw.optional.avx512f: 1"),
                    "avx2" => feature.detected = contents.contains("hw.optional.avx2_0: 1"),
                    "sse4_1" => feature.detected = contents.contains("hw.optional.sse4_1: 1"),
                    "neon" => feature.detected = contents.contains("hw.optional.neon: 1"),
                    _ => {}
                }
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "macos")
    }
}

// No windows detector for now
// TODO: Develop a Windows detector (Access to a windows machine needed)

// Factory that creates the appropriate detector for the current OS
struct PlatformDetector;
impl PlatformDetector {
    fn cpu_features_detectors() -> Vec<Box<dyn CpuFeatureDetector>> {
        vec![Box::new(LinuxDetector), Box::new(MacOSDetector)]
    }

    fn detect_cpu_features(features: &mut [CpuFeature]) {
        // Get detectors for all supported platforms
        let detectors = Self::cpu_features_detectors();

        // Find the applicable detector and use it
        for detector in detectors {
            if detector.is_applicable() {
                detector.detect_features(features);
                break;
            }
        }
    }

    // Emits the cfg flag of the highest priority detected feature and returns
    // the register width that goes with it.
    fn apply(features: &mut [CpuFeature]) -> usize {
        // Sort features by priority (highest first)
        features.sort();

        // if no feature is detected, use fallback implementation
        let (cfg_flag, vector_bits) = features
            .iter()
            .find(|cpu_feature| cpu_feature.detected)
            .map(|cpu_feature| (cpu_feature.cfg_flag, cpu_feature.vector_bits))
            .unwrap_or(("fallback", 128));

        println!("cargo:rustc-cfg={cfg_flag}");

        println!("cargo::rustc-check-cfg=cfg(avx512)");
        println!("cargo::rustc-check-cfg=cfg(avx2)");
        println!("cargo::rustc-check-cfg=cfg(sse)");
        println!("cargo::rustc-check-cfg=cfg(neon)");
        println!("cargo::rustc-check-cfg=cfg(fallback)");

        vector_bits
    }
}

// Width of the scalable-vector architectural maximum, used for `SMax` unless
// overridden. It is the same on every host; the detected width only raises it.
const DEFAULT_MAX_VECTOR_BITS: usize = 2048;

// Largest vector accepted by `VectorShape::SMax`.
// Format: SIMDLY_MAX_VECTOR_BITS="1024" (power of two, at least 64)
fn max_vector_bits() -> usize {
    println!("cargo:rerun-if-env-changed=SIMDLY_MAX_VECTOR_BITS");

    match env::var("SIMDLY_MAX_VECTOR_BITS") {
        Ok(value) => match value.trim().parse::<usize>() {
            Ok(bits) if bits >= 64 && bits.is_power_of_two() => {
                println!("cargo:warning=SIMDLY_MAX_VECTOR_BITS override applied: {bits}");
                bits
            }
            _ => panic!(
                "Invalid SIMDLY_MAX_VECTOR_BITS. Expected a power of two >= 64, e.g. \"1024\""
            ),
        },
        Err(_) => DEFAULT_MAX_VECTOR_BITS,
    }
}

fn main() {
    let mut features = CpuFeature::features();

    // Determine if we're cross-compiling
    let host = env::var("HOST").unwrap_or_default();
    let target = env::var("TARGET").unwrap_or_default();

    let is_native_build = host == target;

    // Only run CPU detection for native builds
    if is_native_build {
        PlatformDetector::detect_cpu_features(&mut features);
    }

    let preferred_bits = PlatformDetector::apply(&mut features);
    let max_bits = max_vector_bits().max(preferred_bits);

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let dest = Path::new(&out_dir).join("vector_config.rs");
    fs::write(
        &dest,
        format!(
            "/// Register width of the widest detected instruction set, in bits.\n\
             pub const PREFERRED_VECTOR_BITS: usize = {preferred_bits};\n\
             /// Width of the `SMax` shape, in bits.\n\
             pub const MAX_VECTOR_BITS: usize = {max_bits};\n"
        ),
    )
    .expect("Failed to write vector_config.rs");

    println!("cargo:rerun-if-changed=build.rs");
}
