//! Application manifest description and XML rendering.
//!
//! See <https://learn.microsoft.com/en-us/windows/win32/sbscs/application-manifests> for more information.

use std::{fmt::Write, string::String};

const OS_WIN10: &str = "{8e0f7a12-bfb3-4fe8-b9a5-48fd50a15a9a}";
const OS_WIN81: &str = "{1f676c76-80e1-4239-95bb-83d0f6d0da78}";
const OS_WIN8: &str = "{4a2f28e3-53b9-4441-ba9c-d69d4a4a6e38}";
const OS_WIN7: &str = "{35138b9a-5d96-4fbd-8e2d-a2440225f93a}";
const OS_WINVISTA: &str = "{e2011457-1546-43c5-a5fe-008deee3d3f0}";

/// Side-by-side assembly identity of the executable.
///
/// It should not be needed unless another assembly depends on this one.
/// If the `name` field is empty, the `<assemblyIdentity>` element is omitted.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct AssemblyIdentity {
    pub name:    String,
    pub version: [u16; 4],
}

/// DPI awareness of the application, corresponding to both the `<dpiAware>`
/// and the `<dpiAwareness>` elements.
///
/// `PerMonitorV2` falls back to `Aware` if the OS does not support it.
/// `PerMonitor` would not scale windows on secondary monitors.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum DpiAwareness {
    #[default]
    Aware,
    Unaware,
    PerMonitor,
    PerMonitorV2,
}

/// Minimum supported OS, a simplified way to fill the compatibility element.
///
/// Its default value is `Win7AndAbove`.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum SupportedOs {
    WinVistaAndAbove,
    #[default]
    Win7AndAbove,
    Win8AndAbove,
    Win81AndAbove,
    Win10AndAbove,
}

/// Required execution level of the application.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum ExecutionLevel {
    #[default]
    AsInvoker,
    HighestAvailable,
    RequireAdministrator,
}

/// Describes an application manifest.
///
/// Its default value corresponds to the most common case. Embed one into a
/// resource set with [`set_manifest`](crate::ResourceSet::set_manifest).
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct AppManifest {
    pub identity:                              AssemblyIdentity,
    pub description:                           String,
    pub compatibility:                         SupportedOs,
    pub execution_level:                       ExecutionLevel,
    /// Require access to other applications' UI elements.
    pub ui_access:                             bool,
    pub auto_elevate:                          bool,
    pub dpi_awareness:                         DpiAwareness,
    pub disable_theming:                       bool,
    pub disable_window_filtering:              bool,
    pub high_resolution_scrolling_aware:       bool,
    pub ultra_high_resolution_scrolling_aware: bool,
    pub long_path_aware:                       bool,
    pub printer_driver_isolation:              bool,
    pub gdi_scaling:                           bool,
    pub segment_heap:                          bool,
    /// Application requires Common Controls V6 (V5 remains the default).
    pub use_common_controls_v6:                bool,
}

fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl AppManifest {
    /// Returns the manifest rendered as UTF-8 XML.
    pub fn to_xml(&self) -> String {
        let supported_os: &[&str] = match self.compatibility {
            SupportedOs::WinVistaAndAbove => {
                &[OS_WIN10, OS_WIN81, OS_WIN8, OS_WIN7, OS_WINVISTA]
            }
            SupportedOs::Win7AndAbove => &[OS_WIN10, OS_WIN81, OS_WIN8, OS_WIN7],
            SupportedOs::Win8AndAbove => &[OS_WIN10, OS_WIN81, OS_WIN8],
            SupportedOs::Win81AndAbove => &[OS_WIN10, OS_WIN81],
            SupportedOs::Win10AndAbove => &[OS_WIN10],
        };
        let execution_level = match self.execution_level {
            ExecutionLevel::AsInvoker => "asInvoker",
            ExecutionLevel::HighestAvailable => "highestAvailable",
            ExecutionLevel::RequireAdministrator => "requireAdministrator",
        };
        let (dpi_aware, dpi_awareness) = match self.dpi_awareness {
            DpiAwareness::Aware => ("true", "system"),
            DpiAwareness::Unaware => ("false", "unaware"),
            DpiAwareness::PerMonitor => ("true/pm", "permonitor"),
            DpiAwareness::PerMonitorV2 => ("true", "permonitorv2,system"),
        };

        let mut xml = String::with_capacity(1024);
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n");
        xml.push_str("<assembly xmlns=\"urn:schemas-microsoft-com:asm.v1\" manifestVersion=\"1.0\">\n");
        if !self.identity.name.is_empty() {
            let v = self.identity.version;
            let _ = writeln!(
                xml,
                "\n  <assemblyIdentity type=\"win32\" name=\"{}\" version=\"{}.{}.{}.{}\" processorArchitecture=\"*\"/>",
                xml_escape(&self.identity.name),
                v[0],
                v[1],
                v[2],
                v[3]
            );
        }
        if !self.description.is_empty() {
            let _ = writeln!(xml, "  <description>{}</description>", xml_escape(&self.description));
        }

        xml.push_str("\n  <compatibility xmlns=\"urn:schemas-microsoft-com:compatibility.v1\">\n");
        xml.push_str("    <application>\n");
        for os_id in supported_os {
            let _ = writeln!(xml, "      <supportedOS Id=\"{}\"/>", os_id);
        }
        xml.push_str("    </application>\n");
        xml.push_str("  </compatibility>\n");

        xml.push_str("\n  <application xmlns=\"urn:schemas-microsoft-com:asm.v3\">\n");
        xml.push_str("    <windowsSettings>\n");
        let _ = writeln!(
            xml,
            "      <dpiAware xmlns=\"http://schemas.microsoft.com/SMI/2005/WindowsSettings\">{}</dpiAware>",
            dpi_aware
        );
        let _ = writeln!(
            xml,
            "      <dpiAwareness xmlns=\"http://schemas.microsoft.com/SMI/2016/WindowsSettings\">{}</dpiAwareness>",
            dpi_awareness
        );
        if self.auto_elevate {
            xml.push_str("      <autoElevate xmlns=\"http://schemas.microsoft.com/SMI/2011/WindowsSettings\">true</autoElevate>\n");
        }
        if self.disable_theming {
            xml.push_str("      <disableTheming xmlns=\"http://schemas.microsoft.com/SMI/2011/WindowsSettings\">true</disableTheming>\n");
        }
        if self.disable_window_filtering {
            xml.push_str("      <disableWindowFiltering xmlns=\"http://schemas.microsoft.com/SMI/2011/WindowsSettings\">true</disableWindowFiltering>\n");
        }
        if self.high_resolution_scrolling_aware {
            xml.push_str("      <highResolutionScrollingAware xmlns=\"http://schemas.microsoft.com/SMI/2011/WindowsSettings\">true</highResolutionScrollingAware>\n");
        }
        if self.printer_driver_isolation {
            xml.push_str("      <printerDriverIsolation xmlns=\"http://schemas.microsoft.com/SMI/2011/WindowsSettings\">true</printerDriverIsolation>\n");
        }
        if self.ultra_high_resolution_scrolling_aware {
            xml.push_str("      <ultraHighResolutionScrollingAware xmlns=\"http://schemas.microsoft.com/SMI/2011/WindowsSettings\">true</ultraHighResolutionScrollingAware>\n");
        }
        if self.long_path_aware {
            xml.push_str("      <longPathAware xmlns=\"http://schemas.microsoft.com/SMI/2016/WindowsSettings\">true</longPathAware>\n");
        }
        if self.gdi_scaling {
            xml.push_str("      <gdiScaling xmlns=\"http://schemas.microsoft.com/SMI/2017/WindowsSettings\">true</gdiScaling>\n");
        }
        if self.segment_heap {
            xml.push_str("      <heapType xmlns=\"http://schemas.microsoft.com/SMI/2020/WindowsSettings\">SegmentHeap</heapType>\n");
        }
        xml.push_str("    </windowsSettings>\n");
        xml.push_str("  </application>\n");

        xml.push_str("\n  <trustInfo xmlns=\"urn:schemas-microsoft-com:asm.v3\">\n");
        xml.push_str("    <security>\n");
        xml.push_str("      <requestedPrivileges>\n");
        let _ = writeln!(
            xml,
            "        <requestedExecutionLevel level=\"{}\" uiAccess=\"{}\"/>",
            execution_level, self.ui_access
        );
        xml.push_str("      </requestedPrivileges>\n");
        xml.push_str("    </security>\n");
        xml.push_str("  </trustInfo>\n");

        if self.use_common_controls_v6 {
            xml.push_str("\n  <dependency>\n");
            xml.push_str("    <dependentAssembly>\n");
            xml.push_str("      <assemblyIdentity type=\"win32\" name=\"Microsoft.Windows.Common-Controls\" version=\"6.0.0.0\" processorArchitecture=\"*\" publicKeyToken=\"6595b64144ccf1df\" language=\"*\"/>\n");
            xml.push_str("    </dependentAssembly>\n");
            xml.push_str("  </dependency>\n");
        }

        xml.push_str("\n</assembly>\n");
        xml
    }
}
