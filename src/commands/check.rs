//! Check command implementation.
//!
//! Validates system requirements and configuration.

use procfind::process::scan_processes;
use procfind::HostProcFs;

use crate::config::{validate_effective_config, Config};
use crate::startup_checks::{check_platform, validate_requirements};

/// Validates system requirements and configuration.
pub fn command_check(proc: bool, all: bool, config: &Config) -> anyhow::Result<()> {
    println!("🔍 procfind - System Check");
    println!("==========================");

    let mut all_ok = true;
    let procfs = HostProcFs::new(config.proc_root());

    // Check /proc filesystem
    if proc || all {
        println!("\n📁 Checking {} filesystem...", procfs.root().display());
        match check_platform(&procfs) {
            Ok(()) => {
                println!("   ✅ procfs accessible");
                match scan_processes(&procfs) {
                    Ok(scan) => {
                        let count = scan.take(5).count();
                        if count == 0 {
                            println!("   ❌ Cannot read any process entries");
                            all_ok = false;
                        } else {
                            println!("   ✅ Can read {} process entries", count);
                        }
                    }
                    Err(e) => {
                        println!("   ❌ Cannot list processes: {}", e);
                        all_ok = false;
                    }
                }
            }
            Err(e) => {
                println!("   ❌ {}", e);
                all_ok = false;
            }
        }
    }

    if all {
        println!("\n🔐 Checking privileges...");
        match validate_requirements(&procfs) {
            Ok(()) => println!("   ✅ exe/cwd links readable"),
            Err(e) => {
                println!("   ❌ {}", e);
                all_ok = false;
            }
        }
    }

    // Check configuration
    println!("\n⚙️  Checking configuration...");
    match validate_effective_config(config) {
        Ok(()) => println!("   ✅ Configuration is valid"),
        Err(e) => {
            println!("   ❌ Configuration invalid: {:#}", e);
            all_ok = false;
        }
    }

    println!("\n📋 Summary:");
    if all_ok {
        println!("   ✅ All checks passed - system is ready");
        Ok(())
    } else {
        println!("   ❌ Some checks failed - please review warnings");
        std::process::exit(1);
    }
}
