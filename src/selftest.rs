// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The embedded self-test: a Whitespace program exercising every
//! instruction, stored as data.  The significant characters carry the
//! program; everything else is commentary describing what each step
//! should print.  After the arithmetic, stack and control-flow checks
//! the program reads one character and one number from input and
//! echoes them back.

/// The self-test program.
pub const TEST_CODE: &str = concat!(
    "-----BEGIN-SUBROUTINE-TO-OUTPUT-A-SPACE",
    "\n \n \t \n----jump-to-label-#2",
    "\n   \t\n----mark-this-spot-as-#1<<<<<<<<<<<<<<<<<<<<",
    "    \n----push-addr-zero-into-stack",
    "\t\t\t----retrieve-value-at-where-stack-top-points",
    " \n ----duplicate-stack's-top-item",
    "\t\n  ----print-result-CHAR-which-should-be-a-space",
    " \n\n----discard-the-space",
    "\n\t\n----return-to-caller",
    "\n   \t \n----mark-this-spot-as-#2<<<<<<<<<<<<<<<<<<<<",
    "-----END-SUBROUTINE-TO-OUTPUT-A-SPACE",
    "    \n----heap-address-zero-pushed-onto-stack",
    "   \t     \n----asci-32-pushed-onto-stack",
    "\t\t ----store-a-space-(ascii-32)-on-the-heap-addr-zero",
    "   \t   \n----push-8-onto-stack",
    "  \t\t \n----push-negative-2-onto-stack",
    "\t   ----add",
    " \n ----duplicate-stack's-top-item",
    "\t\n \t----print-result......expect_6",
    "\n \t \t\n----call-subroutine-to-print-a-space",
    "  \t\t \t\n----push-negative-5-onto-stack",
    "\t  \t----subtract",
    " \n ----duplicate-stack's-top-item",
    "\t\n \t----print-result......expect_11",
    "\n \t \t\n----call-subroutine-to-print-a-space",
    "   \t\t\n----push-3-onto-stack",
    "\t  \n----multiply",
    " \n ----duplicate-stack's-top-item",
    "\t\n \t----print-result......expect_33",
    "\n \t \t\n----call-subroutine-to-print-a-space",
    "   \t \n----push-2-onto-stack",
    "\t \t ----divide",
    " \n ----duplicate-stack's-top-item",
    "\t\n \t----print-result......expect_16",
    "\n \t \t\n----call-subroutine-to-print-a-space",
    "   \t\t\t\n----push-7-onto-stack",
    "\t \t\t----modulo",
    " \n ----duplicate-stack's-top-item",
    "\t\n \t----print-result......expect_2",
    "\n \t \t\n----call-subroutine-to-print-a-space",
    " \n ----duplicate-stack's-top-item",
    "\t \t ----divide",
    " \n ----duplicate-stack's-top-item",
    "\t\n \t----print-result......expect_1",
    "\n \t \t\n----call-subroutine-to-print-a-space",
    "----there-is-currently-1-item-on-stack,namely-1",
    "   \t\t\t\n----push-7-onto-stack",
    "   \t    \n----push-16-onto-stack",
    "   \t \t  \n----push-20-onto-stack",
    "   \t\t  \t\n----push-25-onto-stack",
    "   \t\t\t\t\t\n----push-31-onto-stack",
    " \t  \t\t\n----copy-3rd-stack-item-to-top-of-stack",
    " \n ----duplicate-stack's-top-item",
    "\t\n \t----print-result......expect_16",
    "\n \t \t\n----call-subroutine-to-print-a-space",
    " \n\t----swap-top-two-stack-items",
    " \n ----duplicate-stack's-top-item",
    "\t\n \t----print-result......expect_31",
    "\n \t \t\n----call-subroutine-to-print-a-space",
    " \n\n----discard-the-top-stack-item",
    " \n ----duplicate-stack's-top-item",
    "\t\n \t----print-result......expect_16",
    "\n \t \t\n----call-subroutine-to-print-a-space",
    "----stack-should-be-16,25,20,16,7",
    " \t\n \t\t\n----slide-3-items-off-stack,-keeping-top-item",
    "----stack-should-be-16,7",
    "\t  \n----multiply",
    " \n ----duplicate-stack's-top-item",
    "\t\n \t----print-result......expect_112",
    "\n \t \t\n----call-subroutine-to-print-a-space",
    "   \t \n----push-2-onto-stack",
    " \n ----duplicate-stack's-top-item",
    "\n\t  \t\t\t \n----jump-if-zero-to-#14-FAIL",
    " \n ----duplicate-stack's-top-item",
    "\n\t\t \t\t\t \n----jump-if-negative-to-#14-FAIL",
    "\n   \t     \t\n----mark-this-spot-as-#65<<<<<<<<<<<<<<<<<<<<",
    "   \t\t   \t\t\n----push-99-onto-stack",
    " \n ----duplicate-stack's-top-item",
    "\t\n \t----print-result......expect_99",
    "\n \t \t\n----call-subroutine-to-print-a-space",
    " \n\n----discard-the-99",
    "  \t\t \n----push-negative-2-onto-stack",
    "\t   ----add",
    " \n ----duplicate-stack's-top-item",
    "\t\n \t----print-result......expect_0_1st-time,neg2-second-time",
    "\n \t \t\n----call-subroutine-to-print-a-space",
    "\n   \t\t\t \n----mark-this-spot-as-#14<<<<<<<<<<<<<<<<<<<<",
    " \n ----duplicate-stack's-top-item",
    "\n\t  \t     \t\n----jump-if-zero-to-#65-SUCCESS-1st-time-only",
    " \n ----duplicate-stack's-top-item",
    "\n\t\t \t  \t\t\n----jump-if-negative-to-#19-SUCCESS",
    "   \t\t\t\t\t\t\t\n----push-127-onto-stack",
    " \n ----duplicate-stack's-top-item",
    "\t\n \t----print-result......expect_NOTHING(skipped)",
    "\n \t \t\n----call-subroutine-to-print-a-space",
    "\n   \t  \t\t\n----mark-this-spot-as-#19<<<<<<<<<<<<<<<<<<<<",
    "   \t\t  \t  \n----push-100-onto-stack",
    "\t\n\t ----read-an-acii-char-from-stdin onto the heap",
    "   \t\t  \t  \n----push-100-onto-stack",
    "\t\t\t----retrieve-value-at-where-stack-top-points",
    "\t\n  ----print-result-char-expect-a-charcter-the-user-entered",
    "   \t\t  \t  \n----push-100-onto-stack",
    "\t\n\t\t----read-an-int-digit-from-stdin onto the heap",
    "   \t\t  \t  \n----push-100-onto-stack",
    "\t\t\t----retrieve-value-at-where-stack-top-points",
    "\t\n \t----print-result-int-expect-a-digit-the-user-entered",
    "\n\n\n----end",
);

/// What the self-test prints before it starts echoing input.
pub const EXPECTED_RESULTS: &str = "6 11 33 16 2 1 16 31 16 112 99 0 99 -2";
