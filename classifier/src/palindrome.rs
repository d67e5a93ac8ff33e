//! Decimal palindromes inside sat ranges.
//!
//! Ranges can span quadrillions of sats, so palindromes are never found by
//! scanning. [`next_palindrome`] jumps straight to the smallest palindrome
//! `>= n` by mirroring the left half of `n`, and [`palindromes_at_most`]
//! counts them in closed form.

use rare_sats_ranges::Range;

fn is_palindromic(digits: &[u8]) -> bool {
    digits.iter().eq(digits.iter().rev())
}

pub fn is_palindrome(n: u64) -> bool {
    is_palindromic(n.to_string().as_bytes())
}

/// Adds one to an ASCII decimal number.
fn increment(digits: &[u8]) -> Vec<u8> {
    let mut result = digits.to_vec();
    for digit in result.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return result;
        }
    }
    result.insert(0, b'1');
    result
}

/// `head` followed by its reverse. When `odd`, the last digit of `head` is
/// the middle digit and is not repeated.
fn mirror(head: &[u8], odd: bool) -> Vec<u8> {
    let skip = usize::from(odd);
    let mut result = head.to_vec();
    result.extend(head.iter().rev().skip(skip));
    result
}

/// Smallest decimal palindrome `>= n`, or `None` if it does not fit in a `u64`.
///
/// ```rust
/// use rare_sats::palindrome::next_palindrome;
///
/// assert_eq!(next_palindrome(7), Some(7));
/// assert_eq!(next_palindrome(19), Some(22));
/// assert_eq!(next_palindrome(123), Some(131));
/// assert_eq!(next_palindrome(1999), Some(2002));
/// assert_eq!(next_palindrome(u64::MAX), None);
/// ```
pub fn next_palindrome(n: u64) -> Option<u64> {
    let digits = n.to_string().into_bytes();
    if is_palindromic(&digits) {
        return Some(n);
    }

    let len = digits.len();
    let half = len / 2;
    let odd = len % 2 == 1;
    // `head` is the left half, plus the middle digit when the length is odd.
    let head = &digits[..len - half];
    let right = &digits[len - half..];

    // Equal-length digit strings compare like the numbers they spell.
    let reversed_left: Vec<u8> = digits[..half].iter().rev().copied().collect();
    let candidate = if reversed_left.as_slice() > right {
        mirror(head, odd)
    } else {
        mirror(&increment(head), odd)
    };

    std::str::from_utf8(&candidate).ok()?.parse().ok()
}

/// Lazily yields the palindromes of one range in ascending order.
///
/// Each step jumps from the previous palindrome + 1, so the cost is
/// proportional to the number of palindromes found, not to the range width.
/// Bound the work with [`Iterator::take`] when the range is very wide.
#[derive(Clone, Debug)]
pub struct Palindromes {
    next: Option<u64>,
    end: u64,
}

impl Palindromes {
    pub fn new(range: &Range) -> Self {
        Self {
            next: Some(range.start),
            end: range.end,
        }
    }
}

impl Iterator for Palindromes {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let from = self.next.take()?;
        if from > self.end {
            return None;
        }
        let palindrome = next_palindrome(from)?;
        if palindrome > self.end {
            return None;
        }
        self.next = palindrome.checked_add(1);
        Some(palindrome)
    }
}

impl std::iter::FusedIterator for Palindromes {}

/// Every palindrome inside `range`, ascending.
pub fn list_palindromes_in_range(range: &Range) -> Vec<u64> {
    Palindromes::new(range).collect()
}

/// Every palindrome inside each of `ranges`, range by range.
pub fn list_palindromes(ranges: &[Range]) -> Vec<u64> {
    ranges.iter().flat_map(Palindromes::new).collect()
}

fn digits_in_base(mut n: u64, base: u64) -> Vec<u64> {
    let mut digits = Vec::new();
    loop {
        digits.push(n % base);
        n /= base;
        if n == 0 {
            break;
        }
    }
    digits.reverse();
    digits
}

fn value_in_base(digits: &[u64], base: u64) -> u128 {
    let base = u128::from(base);
    let mut value = 0;
    for &digit in digits {
        value = value * base + u128::from(digit);
    }
    value
}

/// Number of base-`base` palindromes in `0..=n`, zero included.
///
/// Closed form from Pongsriiam & Subwattanachai, "Exact formulas for the
/// number of palindromes up to a given positive integer" (IJMCS 14.1): with
/// `m` the `k + 1` digits of `n` and `C*` the palindrome sharing `m`'s left
/// half,
///
/// `b^ceil(k/2) + [n >= C*] - 1 + sum_{i=0}^{floor(k/2)} m_i * b^(floor(k/2) - i)`.
///
/// # Panics
///
/// Panics if `base < 2`.
pub fn palindromes_at_most(n: u64, base: u64) -> u128 {
    assert!(base >= 2, "palindromes need a base of at least 2");
    let digits = digits_in_base(n, base);
    let len = digits.len();
    let k = len - 1;
    let (k_half_up, k_half_down) = ((k + 1) / 2, k / 2);
    let b = u128::from(base);

    let mut same_left_half = digits[..len - len / 2].to_vec();
    same_left_half.extend(digits[..len / 2].iter().rev());
    let reached_mirror = u128::from(n) >= value_in_base(&same_left_half, base);

    let mut count = b.pow(k_half_up as u32) + u128::from(reached_mirror) - 1;
    for (i, &digit) in digits.iter().take(k_half_down + 1).enumerate() {
        count += u128::from(digit) * b.pow((k_half_down - i) as u32);
    }
    count
}

/// Number of decimal palindromes in `[a, b]`.
///
/// ```rust
/// use rare_sats::palindrome::count_palindromes_between;
///
/// assert_eq!(count_palindromes_between(0, 100), 19);
/// assert_eq!(count_palindromes_between(19, 21), 0);
/// assert_eq!(count_palindromes_between(5, 4), 0);
/// ```
pub fn count_palindromes_between(a: u64, b: u64) -> u128 {
    if a > b {
        return 0;
    }
    let below = match a.checked_sub(1) {
        Some(previous) => palindromes_at_most(previous, 10),
        None => 0,
    };
    palindromes_at_most(b, 10) - below
}
