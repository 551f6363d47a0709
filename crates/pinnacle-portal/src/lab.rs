//! Attack Lab script templates.
//!
//! Seven skeleton scripts for authorized lab exercises. Every template is
//! commentary and placeholders only; nothing here is runnable tooling.

/// Template languages, numbered 1 to 7 in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LabLanguage {
    /// 1) Bash
    #[default]
    Bash,
    /// 2) PowerShell
    PowerShell,
    /// 3) Python
    Python,
    /// 4) PHP
    Php,
    /// 5) Netcat notes
    Netcat,
    /// 6) Perl
    Perl,
    /// 7) Ruby
    Ruby,
}

impl LabLanguage {
    /// All languages in menu order.
    pub const ALL: [Self; 7] = [
        Self::Bash,
        Self::PowerShell,
        Self::Python,
        Self::Php,
        Self::Netcat,
        Self::Perl,
        Self::Ruby,
    ];

    /// Stable identifier.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Bash => "bash",
            Self::PowerShell => "powershell",
            Self::Python => "python",
            Self::Php => "php",
            Self::Netcat => "netcat",
            Self::Perl => "perl",
            Self::Ruby => "ruby",
        }
    }

    /// Menu label, including its number.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bash => "1) Bash",
            Self::PowerShell => "2) PowerShell",
            Self::Python => "3) Python",
            Self::Php => "4) PHP",
            Self::Netcat => "5) Netcat (nc)",
            Self::Perl => "6) Perl",
            Self::Ruby => "7) Ruby",
        }
    }

    /// The template text.
    pub const fn template(self) -> &'static str {
        match self {
            Self::Bash => BASH,
            Self::PowerShell => POWERSHELL,
            Self::Python => PYTHON,
            Self::Php => PHP,
            Self::Netcat => NETCAT,
            Self::Perl => PERL,
            Self::Ruby => RUBY,
        }
    }

    /// Parse a 1-based menu number. Surrounding whitespace is ignored.
    pub fn from_menu_number(input: &str) -> Option<Self> {
        let n: usize = input.trim().parse().ok()?;
        let index = n.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    /// Parse an identifier such as `python`.
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        Self::ALL.into_iter().find(|l| l.id().eq_ignore_ascii_case(id))
    }

    /// Render the numbered menu, one label per line.
    pub fn menu() -> String {
        Self::ALL.map(Self::label).join("\n")
    }
}

/// Current template choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabSelection {
    current: LabLanguage,
}

impl LabSelection {
    /// The selected language.
    pub const fn current(&self) -> LabLanguage {
        self.current
    }

    /// Apply typed input: a menu number or an id.
    ///
    /// Returns `true` if the input named a language. Anything else leaves
    /// the selection as it was.
    pub fn select(&mut self, input: &str) -> bool {
        match LabLanguage::from_menu_number(input).or_else(|| LabLanguage::from_id(input)) {
            Some(language) => {
                self.current = language;
                true
            }
            None => false,
        }
    }

    /// Text of the selected template.
    pub const fn template(&self) -> &'static str {
        self.current.template()
    }
}

const BASH: &str = "\
### BASH SCRIPT TEMPLATE
### For authorized lab use only. Fill in the logic yourself.

# 1. Describe the purpose of this script:
#    - e.g. connectivity test, logging, demo of a concept in lab.
# 2. Add your own commands below.
# 3. Never run outside authorized scope.

# Structure:
#   - Read configuration (IP, port, options).
#   - Connect to lab resource / internal service.
#   - Log actions to a safe location.
#   - Handle errors gracefully.

# Insert your safe, lab-only logic below:
# ...";

const POWERSHELL: &str = "\
### POWERSHELL SCRIPT TEMPLATE
### For defensive / lab demonstration only.

# 1. Define what you want to demonstrate:
#    - e.g. registry auditing, process monitoring, log collection.
# 2. Add safe operations only.
# 3. Keep everything within the test environment.

param(
    [string]$TargetHost = \"lab-host.local\",
    [int]$Port = 0
)

# Outline:
#   - Test connectivity to $TargetHost.
#   - Collect basic system info.
#   - Export results to a log file for training/reporting.

# Insert your logic below:
# ...";

const PYTHON: &str = "\
### PYTHON LAB TEMPLATE
### For scripting in training labs, not production attacks.

import sys


def main():
    # 1. State your goal (log parser, PCAP analyser, scanner demo).
    # 2. Implement safe, non-destructive operations.
    # 3. Keep it inside your authorized scope.
    target = \"lab-target\"
    port = 0
    pass


if __name__ == \"__main__\":
    main()";

const PHP: &str = "\
### PHP LAB TEMPLATE
### Demonstrate concepts in a safe lab application only.

<?php
// 1. Use this to demo input validation, logging, or safe coding practices.
// 2. Do not deploy risky code on real systems.

$config = [
    'lab_mode' => true,
    'description' => 'Training-only script',
];

// Add server-side logic that enforces validation and logs unusual input.

echo \"Lab template: implement your own safe logic here\";

?>";

const NETCAT: &str = "\
### NETCAT / NETWORK NOTES
### Not a command generator. Use as a note space.

# Use this area to:
#  - Record example nc commands discussed during training.
#  - Document how to test ports, banner grabbing or connectivity in a lab.

# Topics you might document (do NOT blindly run commands):
#  - Simple TCP connections to lab services.
#  - Sending test data to custom lab listeners.
#  - Why network monitoring matters.

# Write your own lab-safe notes below:
# ...";

const PERL: &str = "\
### PERL LAB SCRIPT TEMPLATE
### Useful for older environments or scripting basics.

use strict;
use warnings;

# 1. Document the concept you want to demonstrate.
# 2. Implement safe operations (parsing, logging, analysis).
# 3. Avoid destructive behaviour.

my $target = 'lab-target';
my $port   = 0;

print \"Perl lab template: add your own safe logic.\\n\";";

const RUBY: &str = "\
### RUBY TRAINING TEMPLATE
### For demonstrating scripting concepts in security labs.

target = 'lab-target'
port   = 0

# 1. Describe what you are building (scanner, parser, analyzer).
# 2. Ensure all actions are non-destructive and inside lab scope.
# 3. Comment each step for students.

def run_lab_demo(target, port)
  puts \"Running lab demo for #{target} (port: #{port})\"
end

run_lab_demo(target, port)";
