use half::f16;
use rayon::prelude::*;

/// Elementwise unary kernel; input and output are contiguous.
macro_rules! unary_op {
    ($name:ident, [$($t:ident),* $(,)?], $op:expr) => {
        paste::paste! {
            $(
                pub fn [<$name _ $t>](num_els: usize, input: &[$t], out: &mut [$t]) {
                    out[..num_els]
                        .par_iter_mut()
                        .enumerate()
                        .for_each(|(i, o)| *o = ($op)(input[i]));
                }
            )*
        }
    };
}

unary_op!(neg, [f16], |a: f16| -a);
unary_op!(neg, [f32], |a: f32| -a);
unary_op!(neg, [f64], |a: f64| -a);
unary_op!(neg, [i32], |a: i32| -a);
unary_op!(neg, [i64], |a: i64| -a);

unary_op!(abs, [f32], |a: f32| a.abs());
unary_op!(abs, [f64], |a: f64| a.abs());
unary_op!(abs, [i32], |a: i32| a.abs());
unary_op!(abs, [i64], |a: i64| a.abs());
unary_op!(abs, [f16], |a: f16| f16::from_f32(a.to_f32().abs()));

unary_op!(exp, [f32], |a: f32| a.exp());
unary_op!(exp, [f64], |a: f64| a.exp());
unary_op!(exp, [f16], |a: f16| f16::from_f32(a.to_f32().exp()));

unary_op!(ln, [f32], |a: f32| a.ln());
unary_op!(ln, [f64], |a: f64| a.ln());
unary_op!(ln, [f16], |a: f16| f16::from_f32(a.to_f32().ln()));

unary_op!(sqrt, [f32], |a: f32| a.sqrt());
unary_op!(sqrt, [f64], |a: f64| a.sqrt());
unary_op!(sqrt, [f16], |a: f16| f16::from_f32(a.to_f32().sqrt()));

unary_op!(tanh, [f32], |a: f32| a.tanh());
unary_op!(tanh, [f64], |a: f64| a.tanh());
unary_op!(tanh, [f16], |a: f16| f16::from_f32(a.to_f32().tanh()));

// sign(0) = 0, unlike f32::signum
unary_op!(sign, [f32], |a: f32| if a > 0.0 {
    1.0
} else if a < 0.0 {
    -1.0
} else {
    0.0
});
unary_op!(sign, [f64], |a: f64| if a > 0.0 {
    1.0
} else if a < 0.0 {
    -1.0
} else {
    0.0
});
unary_op!(sign, [i32], |a: i32| (a > 0) as i32 - (a < 0) as i32);
unary_op!(sign, [i64], |a: i64| (a > 0) as i64 - (a < 0) as i64);
unary_op!(sign, [f16], |a: f16| {
    let x = a.to_f32();
    f16::from_f32(if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    })
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neg_and_abs() {
        let input = [-1.5f32, 0.0, 2.5];
        let mut out = [0.0f32; 3];
        neg_f32(3, &input, &mut out);
        assert_eq!(out, [1.5, 0.0, -2.5]);
        abs_f32(3, &input, &mut out);
        assert_eq!(out, [1.5, 0.0, 2.5]);
    }

    #[test]
    fn sign_is_zero_at_zero() {
        let input = [-3.0f64, 0.0, 7.0];
        let mut out = [0.0f64; 3];
        sign_f64(3, &input, &mut out);
        assert_eq!(out, [-1.0, 0.0, 1.0]);
    }

    #[test]
    fn exp_f16_round_trips_through_f32() {
        let input = [f16::from_f32(0.0), f16::from_f32(1.0)];
        let mut out = [f16::from_f32(0.0); 2];
        exp_f16(2, &input, &mut out);
        assert_eq!(out[0], f16::from_f32(1.0));
        assert!((out[1].to_f32() - std::f32::consts::E).abs() < 1e-2);
    }
}
